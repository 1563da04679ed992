//! Feature flags name visual properties of a trait combination so conflict
//! rules never match on trait names directly

/// Feature enumeration and bit set
pub mod flags;
/// Trait-to-feature derivation tables
pub mod resolver;

pub use flags::{Feature, FeatureSet};
