//! Histogram computation and histogram-derived tone maps.
//!
//! Provides per-channel and luma histograms plus the two remaps built on them:
//! cumulative-distribution equalization and cutoff-based autocontrast.

use crate::luminance::luma_u8;
use crate::lut::ChannelLut;
use crate::raster::Raster;

/// Histogram data for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Red channel histogram (256 bins)
    pub red: [u32; 256],
    /// Green channel histogram (256 bins)
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins)
    pub blue: [u32; 256],
    /// Luma histogram (256 bins)
    pub luma: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
            luma: [0; 256],
        }
    }
}

impl Histogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Bins for channel 0 (red), 1 (green) or 2 (blue).
    pub fn channel(&self, index: usize) -> &[u32; 256] {
        match index {
            0 => &self.red,
            1 => &self.green,
            _ => &self.blue,
        }
    }

    /// Find the maximum value across the color channels.
    pub fn max_value(&self) -> u32 {
        let max_r = *self.red.iter().max().unwrap_or(&0);
        let max_g = *self.green.iter().max().unwrap_or(&0);
        let max_b = *self.blue.iter().max().unwrap_or(&0);
        max_r.max(max_g).max(max_b)
    }

    /// Total number of samples counted per channel.
    pub fn total(&self) -> u64 {
        self.luma.iter().map(|&c| c as u64).sum()
    }
}

/// Compute RGB and luma histograms in a single pass.
pub fn compute_histogram(image: &Raster) -> Histogram {
    let mut hist = Histogram::new();
    if image.is_empty() {
        return hist;
    }

    for chunk in image.pixels.chunks_exact(3) {
        hist.red[chunk[0] as usize] += 1;
        hist.green[chunk[1] as usize] += 1;
        hist.blue[chunk[2] as usize] += 1;
        hist.luma[luma_u8(chunk[0], chunk[1], chunk[2]) as usize] += 1;
    }

    hist
}

/// Build the cumulative-distribution equalization map for one histogram.
///
/// `lut[v] = round((cdf(v) - cdf_min) * 255 / (total - cdf_min))`, where
/// `cdf_min` is the count of the lowest occupied bin. A histogram with a single
/// occupied bin (or none) maps to identity.
pub fn equalization_lut(bins: &[u32; 256]) -> ChannelLut {
    let total: u64 = bins.iter().map(|&c| c as u64).sum();
    let cdf_min = bins.iter().copied().find(|&c| c > 0).unwrap_or(0) as u64;
    if total == 0 || total == cdf_min {
        return ChannelLut::identity();
    }

    let span = (total - cdf_min) as f64;
    let mut cdf = 0u64;
    let mut lut = [0u8; 256];
    for (value, &count) in bins.iter().enumerate() {
        cdf += count as u64;
        let mapped = cdf.saturating_sub(cdf_min) as f64 * 255.0 / span;
        lut[value] = mapped.round().clamp(0.0, 255.0) as u8;
    }
    ChannelLut { lut }
}

/// Build an autocontrast map that discards `cutoff_percent` of the samples
/// from each end of the histogram and stretches the remaining range to 0-255.
///
/// When the remaining range collapses to a single value the map is identity.
pub fn autocontrast_lut(bins: &[u32; 256], cutoff_percent: f32) -> ChannelLut {
    let mut h: [u64; 256] = [0; 256];
    for (dst, &src) in h.iter_mut().zip(bins.iter()) {
        *dst = src as u64;
    }
    let total: u64 = h.iter().sum();
    let cut = (total as f64 * cutoff_percent.max(0.0) as f64 / 100.0).floor() as u64;

    trim_low(&mut h, cut);
    trim_high(&mut h, cut);

    let lo = h.iter().position(|&c| c > 0);
    let hi = h.iter().rposition(|&c| c > 0);
    let (lo, hi) = match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => (lo as f64, hi as f64),
        _ => return ChannelLut::identity(),
    };

    let scale = 255.0 / (hi - lo);
    let offset = -lo * scale;
    ChannelLut::from_fn(|v| (v as f64 * scale + offset).trunc().clamp(0.0, 255.0) as u8)
}

fn trim_low(h: &mut [u64; 256], mut cut: u64) {
    for bin in h.iter_mut() {
        if cut == 0 {
            break;
        }
        let removed = cut.min(*bin);
        *bin -= removed;
        cut -= removed;
    }
}

fn trim_high(h: &mut [u64; 256], mut cut: u64) {
    for bin in h.iter_mut().rev() {
        if cut == 0 {
            break;
        }
        let removed = cut.min(*bin);
        *bin -= removed;
        cut -= removed;
    }
}
