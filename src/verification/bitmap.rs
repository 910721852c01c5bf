//! Greyscale raster produced by the verification code encoder.

use serde::{Deserialize, Serialize};

/// Luminance of a dark pixel.
pub const DARK: u8 = 0;

/// Luminance of a light pixel.
pub const LIGHT: u8 = 255;

/// An 8-bit greyscale raster, stored row by row from the top-left corner.
///
/// The constructor does not check that the buffer matches the dimensions, so
/// a corrupt bitmap can be represented; consumers that need a consistent
/// buffer check [`Bitmap::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps a raw luminance buffer.
    pub fn from_luma(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw luminance buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Luminance at `(x, y)`, or `None` outside the raster.
    pub fn luma(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// Returns true if the pixel at `(x, y)` is dark.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.luma(x, y).is_some_and(|value| value < 128)
    }

    /// Returns true if the raster is non-empty and the buffer holds exactly
    /// `width * height` pixels.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() as u64 == u64::from(self.width) * u64::from(self.height)
    }
}
