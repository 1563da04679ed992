//! Layered generative-art token generator
//!
//! Each token draws one variant per category from a weighted catalog, derives
//! the visual features of that combination, and composes the category layers
//! onto a fixed-size canvas. Combinations whose layers would clash are handled
//! by an ordered table of conflict rules instead of by the compositor itself.

#![forbid(unsafe_code)]

/// Batch rendering of token ranges over a worker pool
pub mod batch;
/// Trait categories, variant tables and the collection manifest
pub mod catalog;
/// Conflict rules and the layer compositor
pub mod compose;
/// Visual feature flags derived from trait assignments
pub mod features;
/// Input/output operations and error handling
pub mod io;
/// Canvas surface, crops and region fills
pub mod raster;
/// Weighted sampling and per-token trait assembly
pub mod sampling;

pub use io::error::{GenerationError, Result};
