//! TOML collection manifest
//!
//! ```toml
//! [canvas]
//! width = 1262
//! height = 1262
//!
//! [traits.Eyes]
//! values = [{ name = "Bored", file = "traits/Eyes/Bored.png", chance = 120, active = true }]
//!
//! [specials]
//! "Grin Left" = "Special/Grin Left.png"
//! ```
//!
//! File paths are relative to the directory holding the manifest.

use crate::catalog::category::Category;
use crate::catalog::store::Catalog;
use crate::io::configuration::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::io::error::{GenerationError, Result};
use crate::io::image::{create_parent_dir, load_layer};
use image::RgbaImage;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Canvas size section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// One authored variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Variant name
    pub name: String,
    /// Layer image, relative to the manifest directory
    pub file: PathBuf,
    /// Weight in parts-per-thousand
    pub chance: i64,
    /// Inactive variants are kept in the file but never drawn
    #[serde(default = "active_by_default")]
    pub active: bool,
}

const fn active_by_default() -> bool {
    true
}

/// Variants of one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSpec {
    /// Authored variants
    pub values: Vec<VariantSpec>,
}

/// Parsed collection manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Canvas size
    #[serde(default)]
    pub canvas: CanvasSpec,
    /// Variants keyed by category name
    #[serde(default)]
    pub traits: BTreeMap<String, TraitSpec>,
    /// Special asset files keyed by asset name
    #[serde(default)]
    pub specials: BTreeMap<String, PathBuf>,
}

impl Manifest {
    /// Parse a manifest from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ManifestParse`] if the text is not a valid manifest
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| GenerationError::ManifestParse {
            path: origin.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Read and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GenerationError::FileSystem {
            path: path.to_path_buf(),
            operation: "read manifest",
            source: e,
        })?;
        Self::from_toml(&text, path)
    }

    /// Render the manifest as TOML
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ManifestWrite`] if serialization fails
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GenerationError::ManifestWrite { source: e })
    }

    /// Write the manifest to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_toml()?;
        create_parent_dir(path)?;
        std::fs::write(path, text).map_err(|e| GenerationError::FileSystem {
            path: path.to_path_buf(),
            operation: "write manifest",
            source: e,
        })
    }

    /// Active variants of a category, in authored order
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownCategory`] if a trait section does
    /// not name a category
    pub fn active_variants(&self) -> Result<Vec<(Category, &VariantSpec)>> {
        let mut active = Vec::new();
        for (name, spec) in &self.traits {
            let category: Category = name.parse()?;
            active.extend(
                spec.values
                    .iter()
                    .filter(|variant| variant.active)
                    .map(|variant| (category, variant)),
            );
        }
        Ok(active)
    }

    /// Decode every referenced layer and build the catalog
    ///
    /// Relative paths are resolved against `base_dir`. Layers are decoded in
    /// parallel on the current rayon pool.
    ///
    /// # Errors
    ///
    /// Returns an error if a category is unknown, a layer cannot be decoded,
    /// or the catalog fails validation
    pub fn build_catalog(&self, base_dir: &Path) -> Result<Catalog> {
        let variants = self.active_variants()?;

        let variant_layers = variants
            .iter()
            .map(|(_, variant)| base_dir.join(&variant.file))
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|path| load_layer(&path))
            .collect::<Result<Vec<RgbaImage>>>()?;

        let special_layers = self
            .specials
            .values()
            .map(|file| base_dir.join(file))
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|path| load_layer(&path))
            .collect::<Result<Vec<RgbaImage>>>()?;

        let mut builder = Catalog::builder(self.canvas.width, self.canvas.height);
        for ((category, variant), layer) in variants.into_iter().zip(variant_layers) {
            builder = builder.variant(category, variant.name.clone(), variant.chance, layer);
        }
        for (name, layer) in self.specials.keys().zip(special_layers) {
            builder = builder.special(name.clone(), layer);
        }

        let catalog = builder.build()?;
        tracing::debug!(
            variants = catalog.tables().map(|table| table.variants().len()).sum::<usize>(),
            specials = self.specials.len(),
            "catalog built"
        );
        Ok(catalog)
    }
}

/// Load a manifest file and build its catalog
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or any layer fails to load
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let manifest = Manifest::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    manifest.build_catalog(base_dir)
}
