//! Trait catalog
//!
//! This module contains the catalog-related functionality including:
//! - The fixed category order
//! - Variant tables with their implicit no-layer variant
//! - Manifest loading and directory scanning

/// Category enumeration and composition order
pub mod category;
/// TOML collection manifest
pub mod manifest;
/// Manifest generation from a directory of layer images
pub mod scan;
/// Validated variant tables and special assets
pub mod store;

pub use category::Category;
pub use store::{Catalog, Layer};
