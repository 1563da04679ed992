/// Command-line interface
pub mod cli;
/// Collection constants and runtime defaults
pub mod configuration;
/// Error types and token context
pub mod error;
/// Layer loading and token image export
pub mod image;
/// Token metadata documents
pub mod metadata;
/// Batch progress display
pub mod progress;
