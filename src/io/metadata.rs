//! JSON metadata document written next to each token image

use crate::io::error::{GenerationError, Result};
use crate::io::image::create_parent_dir;
use crate::sampling::assembler::TraitAssignment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One `trait_type` / `value` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Category name
    pub trait_type: String,
    /// Variant name, `__NONE__` when the category drew no layer
    pub value: String,
}

/// Metadata of one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token identifier
    pub token_id: u64,
    /// Attributes in category order
    pub attributes: Vec<Attribute>,
}

impl From<&TraitAssignment> for TokenMetadata {
    fn from(assignment: &TraitAssignment) -> Self {
        Self {
            token_id: assignment.token_id(),
            attributes: assignment
                .traits()
                .iter()
                .map(|binding| Attribute {
                    trait_type: binding.category().name().to_owned(),
                    value: binding.value().to_owned(),
                })
                .collect(),
        }
    }
}

impl TokenMetadata {
    /// Serialize as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GenerationError::MetadataExport {
            path: "<memory>".into(),
            source: e,
        })
    }

    /// Write the document to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn write(&self, output_path: &Path) -> Result<()> {
        create_parent_dir(output_path)?;
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            GenerationError::MetadataExport {
                path: output_path.to_path_buf(),
                source: e,
            }
        })?;
        std::fs::write(output_path, json).map_err(|e| GenerationError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "write metadata",
            source: e,
        })
    }
}
