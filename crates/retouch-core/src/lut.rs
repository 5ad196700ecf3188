//! 256-entry lookup tables for per-channel tone mapping.
//!
//! Every point operation that depends only on a sample's own value
//! (brightness, contrast, invert, autocontrast, equalization remaps) is
//! precomputed into a [`ChannelLut`] and applied in a single pass.

use crate::raster::Raster;

/// Pre-computed lookup table: `lut[input] = output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLut {
    pub lut: [u8; 256],
}

impl ChannelLut {
    /// Build a table by evaluating `f` for every input value.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = f(i as u8);
        }
        Self { lut }
    }

    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    /// Look up a single value.
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }

    /// Apply the table to all three channels of an image.
    pub fn apply(&self, image: &Raster) -> Raster {
        if self.is_identity() {
            return image.clone();
        }
        Raster {
            width: image.width,
            height: image.height,
            pixels: image.pixels.iter().map(|&v| self.map(v)).collect(),
        }
    }
}

impl Default for ChannelLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Apply a separate table to each of the R, G and B channels.
pub fn apply_channel_luts(image: &Raster, luts: &[ChannelLut; 3]) -> Raster {
    image.map_pixels(|px| [luts[0].map(px[0]), luts[1].map(px[1]), luts[2].map(px[2])])
}
