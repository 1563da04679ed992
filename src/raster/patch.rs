//! Rectangular crop extraction from layers

use crate::io::error::{Result, raster_error};
use image::RgbaImage;
use image::imageops;

/// Size of one crop edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Up to the source edge
    Full,
    /// Fixed number of pixels
    Pixels(u32),
}

impl Extent {
    const fn resolve(self, available: u32) -> u32 {
        match self {
            Self::Full => available,
            Self::Pixels(size) => {
                if size < available {
                    size
                } else {
                    available
                }
            }
        }
    }
}

/// Declared crop rectangle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Top-left corner in source coordinates
    pub anchor: [u32; 2],
    /// Width of the region
    pub width: Extent,
    /// Height of the region
    pub height: Extent,
}

impl CropRegion {
    /// Region starting at the source origin
    pub const fn from_origin(width: Extent, height: Extent) -> Self {
        Self {
            anchor: [0, 0],
            width,
            height,
        }
    }

    /// Fixed-size region starting at `anchor`
    pub const fn anchored(anchor: [u32; 2], width: u32, height: u32) -> Self {
        Self {
            anchor,
            width: Extent::Pixels(width),
            height: Extent::Pixels(height),
        }
    }

    /// Clip the region to a source of the given size
    ///
    /// Returns `(x, y, width, height)`, or `None` when nothing of the region
    /// lies on the source.
    pub const fn clip(&self, source_width: u32, source_height: u32) -> Option<[u32; 4]> {
        let [x, y] = self.anchor;
        if x >= source_width || y >= source_height {
            return None;
        }
        let width = self.width.resolve(source_width - x);
        let height = self.height.resolve(source_height - y);
        if width == 0 || height == 0 {
            return None;
        }
        Some([x, y, width, height])
    }
}

/// Cropped copy of a layer that remembers where it was cut from
///
/// Drawing a patch places it back at its origin, so only the declared region
/// of the source reaches the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    image: RgbaImage,
    origin: [u32; 2],
}

impl Patch {
    /// Extract a region of a source layer
    ///
    /// # Errors
    ///
    /// Returns an error if the region does not overlap the source at all
    pub fn crop(source: &RgbaImage, region: &CropRegion) -> Result<Self> {
        let [x, y, width, height] =
            region
                .clip(source.width(), source.height())
                .ok_or_else(|| {
                    raster_error(
                        "crop",
                        &format!(
                            "region at {:?} misses {}x{} source",
                            region.anchor,
                            source.width(),
                            source.height()
                        ),
                    )
                })?;

        Ok(Self {
            image: imageops::crop_imm(source, x, y, width, height).to_image(),
            origin: [x, y],
        })
    }

    /// Cropped pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Position of the patch's top-left pixel in source coordinates
    pub const fn origin(&self) -> [u32; 2] {
        self.origin
    }
}
