//! Collection constants and runtime configuration defaults

/// Total probability mass of every category, in parts-per-thousand
pub const PER_MILLE: u32 = 1000;

/// Name of the implicit variant that absorbs a category's weight shortfall
pub const NONE_VARIANT: &str = "__NONE__";

/// Variant drawn on the Eyes step when glasses are deferred to the Mouth step
pub const GLASSES_BASE_EYES: &str = "Bored";

// Collection canvas; layers are authored at this size
/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1262;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1262;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of tokens per batch
pub const DEFAULT_TOKEN_COUNT: u64 = 1000;

/// Default first token identifier
pub const DEFAULT_START_TOKEN: u64 = 0;

/// Default number of tokens rendered concurrently
pub const DEFAULT_JOBS: usize = 1;

// Input and output locations
/// Default collection manifest file
pub const DEFAULT_MANIFEST: &str = "collection.toml";
/// Default output directory for token images and metadata
pub const DEFAULT_OUTPUT_DIR: &str = "tokens";
/// Directory name holding special (category-less) assets when scanning
pub const SPECIAL_DIR: &str = "Special";
/// Separator between trait value and suffix in authored layer file names
pub const LAYER_NAME_SEPARATOR: &str = " - ";

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
