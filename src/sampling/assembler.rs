//! Per-token trait assignment, one independent draw per category

use crate::catalog::category::Category;
use crate::catalog::store::Catalog;
use crate::io::configuration::NONE_VARIANT;
use crate::io::error::{GenerationError, Result};
use crate::sampling::random::RandomSelector;

/// Chosen variant of one category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trait {
    category: Category,
    value: String,
}

impl Trait {
    /// Create a trait binding
    pub fn new(category: Category, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }

    /// Category the value was drawn for
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Variant name
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the implicit no-layer variant was drawn
    pub fn is_none(&self) -> bool {
        self.value == NONE_VARIANT
    }
}

/// One variant per category for a token, in category order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraitAssignment {
    token_id: u64,
    traits: Vec<Trait>,
}

impl TraitAssignment {
    /// Build an assignment from one value per category, given in category order
    pub fn from_values<S: Into<String>>(token_id: u64, values: [S; Category::COUNT]) -> Self {
        let traits = Category::ORDER
            .into_iter()
            .zip(values)
            .map(|(category, value)| Trait::new(category, value))
            .collect();
        Self { token_id, traits }
    }

    /// Token identifier the assignment belongs to
    pub const fn token_id(&self) -> u64 {
        self.token_id
    }

    /// Traits in category order
    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    /// Variant name chosen for a category
    pub fn value(&self, category: Category) -> &str {
        self.traits
            .iter()
            .find(|binding| binding.category == category)
            .map_or(NONE_VARIANT, Trait::value)
    }
}

/// Draws trait assignments from a catalog
///
/// Every token consumes its own seeded stream, one roll per category in
/// category order; categories are drawn independently of each other.
#[derive(Debug, Clone, Copy)]
pub struct MetadataAssembler<'a> {
    catalog: &'a Catalog,
    seed: u64,
}

impl<'a> MetadataAssembler<'a> {
    /// Create an assembler for a seeded batch
    pub const fn new(catalog: &'a Catalog, seed: u64) -> Self {
        Self { catalog, seed }
    }

    /// Draw the assignment of one token
    ///
    /// # Errors
    ///
    /// Returns an error if a category's weight table cannot produce a variant;
    /// no partial assignment is returned
    pub fn assemble(&self, token_id: u64) -> Result<TraitAssignment> {
        let mut selector = RandomSelector::for_token(self.seed, token_id);
        assemble_with(self.catalog, token_id, &mut selector)
    }
}

/// Draw one variant per category using an explicit random source
///
/// # Errors
///
/// Returns [`GenerationError::EmptyWeightTable`] if a draw lands outside a
/// category's variant list
pub fn assemble_with(
    catalog: &Catalog,
    token_id: u64,
    selector: &mut RandomSelector,
) -> Result<TraitAssignment> {
    let mut traits = Vec::with_capacity(Category::COUNT);
    for category in Category::ORDER {
        let table = catalog.table(category);
        let index = table.weights().pick(selector.roll(table.weights().total()));
        let variant = table
            .at(index)
            .ok_or(GenerationError::EmptyWeightTable {
                category: Some(category),
            })?;
        traits.push(Trait::new(category, variant.name()));
    }
    Ok(TraitAssignment { token_id, traits })
}
