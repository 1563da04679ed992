//! Immutable asset catalog shared by every render worker
//!
//! The catalog holds, per category, the named variants with their
//! parts-per-thousand weights and decoded layers, plus the special assets that
//! conflict rules draw without belonging to any category. It is built once,
//! validated, and only read afterwards.

use crate::catalog::category::Category;
use crate::io::configuration::{NONE_VARIANT, PER_MILLE};
use crate::io::error::{GenerationError, Result};
use crate::sampling::weights::WeightTable;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;

/// Decoded RGBA layer shared between the catalog and renders
pub type Layer = Arc<RgbaImage>;

/// One possible value of a category
#[derive(Debug, Clone)]
pub struct Variant {
    name: String,
    weight: u32,
    layer: Option<Layer>,
}

impl Variant {
    /// Variant name, unique within its category
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selection weight in parts-per-thousand
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Decoded layer; absent only for the implicit no-layer variant
    pub const fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }

    /// Whether this is the implicit no-layer variant
    pub fn is_none(&self) -> bool {
        self.name == NONE_VARIANT
    }
}

/// Variants of one category together with their weight table
#[derive(Debug, Clone)]
pub struct CategoryTable {
    category: Category,
    variants: Vec<Variant>,
    positions: HashMap<String, usize>,
    weights: WeightTable,
}

impl CategoryTable {
    fn build(category: Category, mut entries: Vec<Variant>) -> Result<Self> {
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let explicit: u32 = entries.iter().map(|variant| variant.weight).sum();
        if explicit > PER_MILLE {
            return Err(GenerationError::WeightOverflow {
                category,
                total: u64::from(explicit),
            });
        }
        if explicit < PER_MILLE {
            let position = entries.partition_point(|variant| variant.name.as_str() < NONE_VARIANT);
            entries.insert(
                position,
                Variant {
                    name: NONE_VARIANT.to_string(),
                    weight: PER_MILLE - explicit,
                    layer: None,
                },
            );
        }

        let weights: Vec<u32> = entries.iter().map(|variant| variant.weight).collect();
        let weights = WeightTable::new(category, &weights)?;
        let positions = entries
            .iter()
            .enumerate()
            .map(|(index, variant)| (variant.name.clone(), index))
            .collect();

        Ok(Self {
            category,
            variants: entries,
            positions,
            weights,
        })
    }

    /// Category this table belongs to
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Variants ordered by name, the implicit no-layer variant included
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Look up a variant by name
    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.positions
            .get(name)
            .and_then(|&index| self.variants.get(index))
    }

    /// Variant at a weight-table index
    pub fn at(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }

    /// Cumulative weights aligned with [`CategoryTable::variants`]
    pub const fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Weight assigned to the implicit no-layer variant
    pub fn none_weight(&self) -> u32 {
        self.get(NONE_VARIANT).map_or(0, Variant::weight)
    }
}

/// Read-only catalog of every category table and special asset
#[derive(Debug, Clone)]
pub struct Catalog {
    width: u32,
    height: u32,
    tables: [CategoryTable; Category::COUNT],
    specials: HashMap<String, Layer>,
}

impl Catalog {
    /// Start building a catalog for a canvas of the given size
    pub fn builder(width: u32, height: u32) -> CatalogBuilder {
        CatalogBuilder {
            width,
            height,
            entries: Vec::new(),
            specials: Vec::new(),
        }
    }

    /// Canvas size (width, height) every layer is authored for
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Table of one category
    pub fn table(&self, category: Category) -> &CategoryTable {
        let [background, fur, clothes, eyes, head, mouth, jewelry] = &self.tables;
        match category {
            Category::Background => background,
            Category::Fur => fur,
            Category::Clothes => clothes,
            Category::Eyes => eyes,
            Category::Head => head,
            Category::Mouth => mouth,
            Category::Jewelry => jewelry,
        }
    }

    /// All tables in category order
    pub fn tables(&self) -> impl Iterator<Item = &CategoryTable> {
        self.tables.iter()
    }

    /// Look up a variant of a category
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingAsset`] if the category has no such variant
    pub fn variant(&self, category: Category, name: &str) -> Result<&Variant> {
        self.table(category)
            .get(name)
            .ok_or_else(|| GenerationError::MissingAsset {
                asset: format!("{category}/{name}"),
                rule: None,
            })
    }

    /// Look up a special asset
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingAsset`] if no special asset has that name
    pub fn special(&self, name: &str) -> Result<&Layer> {
        self.specials
            .get(name)
            .ok_or_else(|| GenerationError::MissingAsset {
                asset: format!("special:{name}"),
                rule: None,
            })
    }

    /// Names of all special assets, sorted
    pub fn special_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Collects catalog entries and validates them into a [`Catalog`]
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    width: u32,
    height: u32,
    entries: Vec<(Category, String, i64, Layer)>,
    specials: Vec<(String, Layer)>,
}

impl CatalogBuilder {
    /// Add a weighted variant to a category
    #[must_use]
    pub fn variant(
        mut self,
        category: Category,
        name: impl Into<String>,
        weight: i64,
        layer: impl Into<Layer>,
    ) -> Self {
        self.entries
            .push((category, name.into(), weight, layer.into()));
        self
    }

    /// Add a special asset that rules draw without any owning category
    #[must_use]
    pub fn special(mut self, name: impl Into<String>, layer: impl Into<Layer>) -> Self {
        self.specials.push((name.into(), layer.into()));
        self
    }

    /// Validate the collected entries and freeze them into a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A weight is negative or larger than 1000
    /// - A category's weights sum to more than 1000
    /// - A variant or special name is declared twice, or a variant uses the
    ///   reserved no-layer name
    /// - A layer is larger than the canvas
    pub fn build(self) -> Result<Catalog> {
        let Self {
            width,
            height,
            entries,
            specials,
        } = self;

        let mut grouped: Vec<Vec<Variant>> = vec![Vec::new(); Category::COUNT];
        for (category, name, weight, layer) in entries {
            if !(0..=i64::from(PER_MILLE)).contains(&weight) {
                return Err(GenerationError::InvalidWeight {
                    category,
                    variant: name,
                    weight,
                });
            }
            check_layer_fits(&format!("{category}/{name}"), &layer, width, height)?;

            let Some(bucket) = grouped.get_mut(category.index()) else {
                continue;
            };
            if name == NONE_VARIANT || bucket.iter().any(|variant| variant.name == name) {
                return Err(GenerationError::DuplicateVariant {
                    category,
                    variant: name,
                });
            }
            bucket.push(Variant {
                name,
                weight: weight as u32,
                layer: Some(layer),
            });
        }

        let mut grouped = grouped.into_iter();
        let [background, fur, clothes, eyes, head, mouth, jewelry] = Category::ORDER
            .map(|category| CategoryTable::build(category, grouped.next().unwrap_or_default()));
        let tables = [
            background?,
            fur?,
            clothes?,
            eyes?,
            head?,
            mouth?,
            jewelry?,
        ];

        let mut special_map = HashMap::with_capacity(specials.len());
        for (name, layer) in specials {
            check_layer_fits(&format!("special:{name}"), &layer, width, height)?;
            if special_map.insert(name.clone(), layer).is_some() {
                return Err(GenerationError::InvalidLayer {
                    asset: format!("special:{name}"),
                    reason: "declared more than once".to_string(),
                });
            }
        }

        Ok(Catalog {
            width,
            height,
            tables,
            specials: special_map,
        })
    }
}

fn check_layer_fits(asset: &str, layer: &RgbaImage, width: u32, height: u32) -> Result<()> {
    if layer.width() > width || layer.height() > height {
        return Err(GenerationError::InvalidLayer {
            asset: asset.to_string(),
            reason: format!(
                "layer is {}x{}, canvas is {width}x{height}",
                layer.width(),
                layer.height()
            ),
        });
    }
    Ok(())
}
