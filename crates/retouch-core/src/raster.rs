//! The RGB raster type shared by every stage of the editor.
//!
//! A [`Raster`] is an owned, row-major buffer of 8-bit RGB samples. Every
//! operation in this crate takes a `&Raster` and returns a new one; nothing
//! mutates the caller's image.

use thiserror::Error;

/// Number of channels in every raster (R, G, B).
pub const CHANNELS: usize = 3;

/// Errors raised when building a raster from untrusted parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// An RGB image with 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster, checking that the buffer matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = buffer_len(width, height);
        if pixels.len() != expected {
            return Err(RasterError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(buffer_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(buffer_len(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check the buffer against the dimensions.
    pub fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = buffer_len(self.width, self.height);
        if self.pixels.len() != expected {
            return Err(RasterError::InvalidPixelData {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Number of channels per pixel. Always 3.
    pub fn channels(&self) -> usize {
        CHANNELS
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Read the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.index(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Read a pixel with coordinates clamped to the image edges.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> [u8; 3] {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixel(cx, cy)
    }

    /// Byte offset of pixel (x, y) in the buffer.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Apply `f` to every pixel, producing a new raster of the same size.
    pub fn map_pixels(&self, mut f: impl FnMut([u8; 3]) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for chunk in self.pixels.chunks_exact(CHANNELS) {
            pixels.extend_from_slice(&f([chunk[0], chunk[1], chunk[2]]));
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Combine two same-sized rasters sample by sample.
    ///
    /// Returns `None` when the dimensions differ.
    pub fn zip_with(&self, other: &Raster, mut f: impl FnMut(u8, u8) -> u8) -> Option<Self> {
        if self.width != other.width || self.height != other.height {
            return None;
        }
        let pixels = self
            .pixels
            .iter()
            .zip(&other.pixels)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Some(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}

#[inline]
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// Round and clamp a float sample into the u8 range.
#[inline]
pub fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
