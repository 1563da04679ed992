//! Fixed-size RGBA surface that one token is composed on

use crate::io::error::{GenerationError, Result, raster_error};
use crate::raster::patch::Patch;
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use std::io::Cursor;
use std::path::PathBuf;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Rectangle from its corners, `max` exclusive
    pub const fn from_corners(min: [u32; 2], max: [u32; 2]) -> Self {
        Self {
            x: min[0],
            y: min[1],
            width: max[0].saturating_sub(min[0]),
            height: max[1].saturating_sub(min[1]),
        }
    }

    /// Check the rectangle lies inside a surface of the given size
    pub const fn fits(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Composition surface, transparent when created
///
/// Only mutated through [`Canvas::draw_over`], [`Canvas::draw_patch`] and
/// [`Canvas::fill_region`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Canvas size (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Alpha-composite a layer over the canvas at `offset`
    ///
    /// Pixels falling outside the canvas are clipped. Transparent source
    /// pixels leave the canvas unchanged and opaque ones replace it.
    pub fn draw_over(&mut self, layer: &RgbaImage, offset: [i64; 2]) {
        imageops::overlay(&mut self.image, layer, offset[0], offset[1]);
    }

    /// Draw a cropped patch back at the position it was cut from
    pub fn draw_patch(&mut self, patch: &Patch) {
        let [x, y] = patch.origin();
        self.draw_over(patch.image(), [i64::from(x), i64::from(y)]);
    }

    /// Read one canvas pixel
    ///
    /// # Errors
    ///
    /// Returns an error if the point lies outside the canvas
    pub fn pixel(&self, point: [u32; 2]) -> Result<Rgba<u8>> {
        self.image
            .get_pixel_checked(point[0], point[1])
            .copied()
            .ok_or_else(|| {
                raster_error(
                    "sample",
                    &format!("point {point:?} is outside {:?} canvas", self.dimensions()),
                )
            })
    }

    /// Overwrite a rectangle with the colour currently at `sample`
    ///
    /// The fill replaces pixels rather than blending with them.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample point or the rectangle leave the canvas
    pub fn fill_region(&mut self, region: Rect, sample: [u32; 2]) -> Result<()> {
        let color = self.pixel(sample)?;
        let (width, height) = self.dimensions();
        if !region.fits(width, height) {
            return Err(raster_error(
                "fill",
                &format!("{region:?} exceeds {width}x{height} canvas"),
            ));
        }

        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
                    *pixel = color;
                }
            }
        }
        Ok(())
    }

    /// Composed pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Give up the canvas, keeping its pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the canvas as PNG in memory
    ///
    /// # Errors
    ///
    /// Returns an error if the PNG encoder fails
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| GenerationError::ImageExport {
                path: PathBuf::from("<memory>"),
                source: e,
            })?;
        Ok(bytes)
    }
}
