//! Layer decoding and PNG export of composed tokens

use crate::io::error::{GenerationError, Result};
use crate::raster::canvas::Canvas;
use image::RgbaImage;
use std::path::Path;

/// Decode a layer image from disk into RGBA
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_layer(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| GenerationError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgba8())
}

/// Export a composed canvas as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_canvas_png(canvas: &Canvas, output_path: &Path) -> Result<()> {
    create_parent_dir(output_path)?;

    canvas
        .image()
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Create the parent directory of an output file if it does not exist
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn create_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}
