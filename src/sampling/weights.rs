//! Cumulative weight tables for per-category variant selection

use crate::catalog::category::Category;
use crate::io::configuration::PER_MILLE;
use crate::io::error::{GenerationError, Result};
use rand::Rng;

/// Cumulative integer weights over a category's variants
///
/// Variants keep the order they were given in; a roll is mapped to the first
/// variant whose cumulative weight exceeds it, so zero-weight variants are
/// never picked and selection is O(log n).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    category: Category,
    cumulative: Vec<u32>,
}

impl WeightTable {
    /// Build a table from per-variant weights in parts-per-thousand
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The weights sum to more than 1000
    /// - The table is empty or every weight is zero
    pub fn new(category: Category, weights: &[u32]) -> Result<Self> {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total: u64 = 0;
        for &weight in weights {
            total += u64::from(weight);
            if total > u64::from(PER_MILLE) {
                return Err(GenerationError::WeightOverflow {
                    category,
                    total: weights.iter().map(|&w| u64::from(w)).sum(),
                });
            }
            cumulative.push(total as u32);
        }

        if total == 0 {
            return Err(GenerationError::EmptyWeightTable {
                category: Some(category),
            });
        }

        Ok(Self {
            category,
            cumulative,
        })
    }

    /// Category the table was built for
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Number of variants, zero-weight ones included
    pub const fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Whether the table has no variants (never true for a built table)
    pub const fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sum of all weights
    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Weight of the variant at `index`
    pub fn weight(&self, index: usize) -> Option<u32> {
        let upper = *self.cumulative.get(index)?;
        let lower = match index.checked_sub(1) {
            Some(previous) => self.cumulative.get(previous).copied().unwrap_or(0),
            None => 0,
        };
        Some(upper - lower)
    }

    /// Map a roll in `0..total` to a variant index
    ///
    /// Rolls past the total clamp to the last variant with mass.
    pub fn pick(&self, roll: u32) -> usize {
        let index = self.cumulative.partition_point(|&bound| bound <= roll);
        if index < self.cumulative.len() {
            index
        } else {
            self.cumulative
                .partition_point(|&bound| bound < self.total())
                .min(self.cumulative.len().saturating_sub(1))
        }
    }

    /// Draw one variant index, consuming a single roll from `rng`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let roll = rng.random_range(0..self.total());
        self.pick(roll)
    }
}
