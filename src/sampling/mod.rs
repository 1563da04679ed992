/// Per-token trait assignment
pub mod assembler;
/// Seeded random source
pub mod random;
/// Cumulative per-mille weight tables
pub mod weights;
