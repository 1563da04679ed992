//! Token rendering pipeline and the batch driver that runs it over id ranges

/// Worker pool driver with fail-fast and keep-going policies
pub mod driver;
/// Single-token pipeline from assignment to composed canvas
pub mod token;

pub use driver::{BatchConfig, BatchReport, FailurePolicy};
pub use token::{RenderedToken, TokenRenderer};
