//! Error types and token context for catalog, sampling and render operations

use crate::catalog::category::Category;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Explicit variant weights of a category exceed 1000 parts-per-thousand
    WeightOverflow {
        /// Category whose table overflowed
        category: Category,
        /// Sum of the explicit weights
        total: u64,
    },

    /// A single variant weight is outside `0..=1000`
    InvalidWeight {
        /// Category owning the variant
        category: Category,
        /// Variant name
        variant: String,
        /// Weight as written in the configuration
        weight: i64,
    },

    /// Two variants of one category share a name
    DuplicateVariant {
        /// Category owning both variants
        category: Category,
        /// Repeated variant name
        variant: String,
    },

    /// Category name in configuration does not match any known category
    UnknownCategory {
        /// Name as written in the configuration
        name: String,
    },

    /// A rule or lookup referenced an asset the catalog does not hold
    ///
    /// Indicates a rule table / catalog mismatch and always aborts the render.
    MissingAsset {
        /// Human readable asset reference (`Eyes/Bored`, `special:Laser`, ...)
        asset: String,
        /// Rule that referenced the asset, if any
        rule: Option<&'static str>,
    },

    /// A conflict rule is malformed for the current catalog
    InvalidRule {
        /// Rule name
        rule: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A decoded layer cannot be used on the collection canvas
    InvalidLayer {
        /// Asset reference the layer belongs to
        asset: String,
        /// What is wrong with it
        reason: String,
    },

    /// Weight table is empty or carries no probability mass
    EmptyWeightTable {
        /// Category the table was built for, when known
        category: Option<Category>,
    },

    /// Raster operation could not be carried out
    Raster {
        /// Raster operation name
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Error raised while producing one token
    Token {
        /// Identifier of the failing token
        token_id: u64,
        /// Underlying failure
        source: Box<GenerationError>,
    },

    /// A keep-going batch finished with failed tokens
    BatchIncomplete {
        /// Number of tokens that failed
        failed: usize,
        /// Number of tokens attempted
        attempted: u64,
    },

    /// Worker pool could not be started
    WorkerPool {
        /// Underlying rayon error
        source: rayon::ThreadPoolBuildError,
    },

    /// Failed to decode a layer image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or save a composed token image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Collection manifest could not be parsed
    ManifestParse {
        /// Manifest path
        path: PathBuf,
        /// Underlying TOML error
        source: Box<toml::de::Error>,
    },

    /// Collection manifest could not be serialized
    ManifestWrite {
        /// Underlying TOML error
        source: toml::ser::Error,
    },

    /// Token metadata could not be serialized
    MetadataExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Coarse error classes used by the batch driver when reporting failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Catalog or rule authoring defect; recurs deterministically
    Configuration,
    /// Corrupt or empty weight table
    Sampling,
    /// Raster operation failure
    Render,
    /// Filesystem or encoding failure
    Io,
}

impl GenerationError {
    /// Classify the error, looking through token wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WeightOverflow { .. }
            | Self::InvalidWeight { .. }
            | Self::DuplicateVariant { .. }
            | Self::UnknownCategory { .. }
            | Self::MissingAsset { .. }
            | Self::InvalidRule { .. }
            | Self::InvalidLayer { .. }
            | Self::ManifestParse { .. }
            | Self::InvalidParameter { .. } => ErrorKind::Configuration,
            Self::EmptyWeightTable { .. } => ErrorKind::Sampling,
            Self::Raster { .. } => ErrorKind::Render,
            Self::Token { source, .. } => source.kind(),
            Self::BatchIncomplete { .. } => ErrorKind::Render,
            Self::ImageLoad { .. }
            | Self::ImageExport { .. }
            | Self::ManifestWrite { .. }
            | Self::MetadataExport { .. }
            | Self::WorkerPool { .. }
            | Self::FileSystem { .. } => ErrorKind::Io,
        }
    }

    /// Token identifier carried by the error, if it was raised for one token
    pub const fn token_id(&self) -> Option<u64> {
        match self {
            Self::Token { token_id, .. } => Some(*token_id),
            _ => None,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightOverflow { category, total } => {
                write!(
                    f,
                    "Weights of category {category} sum to {total}, more than 1000 per mille"
                )
            }
            Self::InvalidWeight {
                category,
                variant,
                weight,
            } => {
                write!(
                    f,
                    "Variant {category}/{variant} has weight {weight}, expected 0..=1000"
                )
            }
            Self::DuplicateVariant { category, variant } => {
                write!(f, "Variant {category}/{variant} is declared more than once")
            }
            Self::UnknownCategory { name } => write!(f, "Unknown category '{name}'"),
            Self::MissingAsset { asset, rule } => match rule {
                Some(rule) => write!(f, "Rule '{rule}' references missing asset {asset}"),
                None => write!(f, "Missing asset {asset}"),
            },
            Self::InvalidRule { rule, reason } => {
                write!(f, "Invalid rule '{rule}': {reason}")
            }
            Self::InvalidLayer { asset, reason } => {
                write!(f, "Invalid layer for {asset}: {reason}")
            }
            Self::EmptyWeightTable { category } => match category {
                Some(category) => write!(f, "Weight table for {category} has no mass"),
                None => write!(f, "Weight table has no mass"),
            },
            Self::Raster { operation, reason } => {
                write!(f, "Raster error in {operation}: {reason}")
            }
            Self::Token { token_id, source } => write!(f, "Token {token_id}: {source}"),
            Self::WorkerPool { source } => write!(f, "Failed to start worker pool: {source}"),
            Self::BatchIncomplete { failed, attempted } => {
                write!(f, "{failed} of {attempted} tokens failed to render")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::ManifestParse { path, source } => {
                write!(f, "Failed to parse manifest '{}': {source}", path.display())
            }
            Self::ManifestWrite { source } => write!(f, "Failed to write manifest: {source}"),
            Self::MetadataExport { path, source } => {
                write!(
                    f,
                    "Failed to export metadata to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ManifestParse { source, .. } => Some(source.as_ref()),
            Self::ManifestWrite { source } => Some(source),
            Self::MetadataExport { source, .. } => Some(source),
            Self::WorkerPool { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Token { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Attaches the identifier of the token being produced to an error
pub trait WithToken<T> {
    /// Wrap the error in [`GenerationError::Token`]
    ///
    /// Errors that already carry a token identifier are passed through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the original error with the token identifier applied
    fn for_token(self, token_id: u64) -> Result<T>;
}

impl<T, E> WithToken<T> for std::result::Result<T, E>
where
    E: Into<GenerationError>,
{
    fn for_token(self, token_id: u64) -> Result<T> {
        self.map_err(|e| match e.into() {
            error @ GenerationError::Token { .. } => error,
            error => GenerationError::Token {
                token_id,
                source: Box::new(error),
            },
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a raster operation error
pub fn raster_error(operation: &'static str, reason: &impl ToString) -> GenerationError {
    GenerationError::Raster {
        operation,
        reason: reason.to_string(),
    }
}
