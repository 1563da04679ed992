//! Authors a manifest from a directory of layer images
//!
//! Expected layout is one directory per category plus an optional `Special`
//! directory, each holding PNG files:
//!
//! ```text
//! layers/
//!   Background/Blue.png
//!   Eyes/Bored - v2.png
//!   Special/Grin Left.png
//! ```

use crate::catalog::category::Category;
use crate::catalog::manifest::{CanvasSpec, Manifest, TraitSpec, VariantSpec};
use crate::io::configuration::{LAYER_NAME_SEPARATOR, PER_MILLE, SPECIAL_DIR};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use std::path::{Path, PathBuf};

/// Variant name encoded in a layer file name
///
/// `"Bored - v2.png"` names `Bored`; without a separator the stem before the
/// single dot is used.
///
/// # Errors
///
/// Returns an error if the file name splits into neither two `" - "` parts
/// nor two `.` parts
pub fn variant_name(file_name: &str) -> Result<String> {
    let parts: Vec<&str> = file_name.split(LAYER_NAME_SEPARATOR).collect();
    if let [name, _] = parts.as_slice() {
        return Ok((*name).to_string());
    }
    let parts: Vec<&str> = file_name.split('.').collect();
    if let [name, _] = parts.as_slice() {
        return Ok((*name).to_string());
    }
    Err(invalid_parameter(
        "layer file name",
        &file_name,
        &format!("expected '<name>{LAYER_NAME_SEPARATOR}<suffix>' or '<name>.png'"),
    ))
}

/// Build a manifest describing every layer under `root`
///
/// Paths in the manifest are relative to `root`. Chances within a category
/// are spread evenly so the manifest loads as is.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a file name does not
/// encode a variant name
pub fn scan_directory(root: &Path, canvas: CanvasSpec) -> Result<Manifest> {
    let mut manifest = Manifest {
        canvas,
        ..Manifest::default()
    };

    for category in Category::ORDER {
        let files = png_files(&root.join(category.name()))?;
        if files.is_empty() {
            continue;
        }
        let chance = i64::from(PER_MILLE) / files.len() as i64;
        let mut values = Vec::with_capacity(files.len());
        for file in files {
            values.push(VariantSpec {
                name: variant_name(&file)?,
                file: PathBuf::from(category.name()).join(&file),
                chance,
                active: true,
            });
        }
        tracing::debug!(category = %category, variants = values.len(), "scanned category");
        manifest
            .traits
            .insert(category.name().to_string(), TraitSpec { values });
    }

    for file in png_files(&root.join(SPECIAL_DIR))? {
        let name = Path::new(&file)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        manifest
            .specials
            .insert(name, PathBuf::from(SPECIAL_DIR).join(&file));
    }

    Ok(manifest)
}

// Sorted PNG file names directly inside `dir`; a missing directory is empty
fn png_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| GenerationError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read layer directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| GenerationError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read layer directory",
                source: e,
            })?
            .path();
        if path.is_file()
            && path.extension().and_then(|s| s.to_str()) == Some("png")
            && let Some(name) = path.file_name().and_then(|s| s.to_str())
        {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}
