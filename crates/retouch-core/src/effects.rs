//! Multi-step stylized effects built from the point and neighborhood filters.
//!
//! Intensity-parametrized effects take an `intensity` in the 0.1-2.0 range;
//! the rest ignore it.

use serde::{Deserialize, Serialize};

use crate::adjustments::{enhance_contrast, grayscale, invert, posterize};
use crate::histogram::{autocontrast_lut, compute_histogram, equalization_lut};
use crate::kernel::{edge_detect, gaussian_blur, mode_filter, window_size};
use crate::lut::{apply_channel_luts, ChannelLut};
use crate::luminance::pixel_luma;
use crate::mask::{composite_over, Falloff, RadialMask};
use crate::raster::{clamp_u8, Raster};

/// Dark warm color that vignette edges fade into.
pub const VIGNETTE_FILL: [u8; 3] = [30, 20, 10];

/// Width in pixels of the divider drawn by [`compare_split`].
pub const DIVIDER_WIDTH: u32 = 2;

/// Posterize levels used by [`cartoonify`].
const CARTOON_LEVELS: u16 = 4;

/// How the `histogram_eq` filter is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualizationMode {
    /// Luma CDF equalization blended with the original by intensity.
    #[default]
    Luma,
    /// Degraded mode: a plain contrast boost of `1 + 0.5 * intensity`.
    /// Does not look at the histogram.
    ContrastBoost,
}

/// Apply the classic sepia tone matrix.
///
/// ```text
/// R' = 0.393 R + 0.769 G + 0.189 B
/// G' = 0.349 R + 0.686 G + 0.168 B
/// B' = 0.272 R + 0.534 G + 0.131 B
/// ```
/// Results above 255 saturate; fractions are truncated.
pub fn sepia(image: &Raster) -> Raster {
    image.map_pixels(|[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        [
            (0.393 * r + 0.769 * g + 0.189 * b).min(255.0) as u8,
            (0.349 * r + 0.686 * g + 0.168 * b).min(255.0) as u8,
            (0.272 * r + 0.534 * g + 0.131 * b).min(255.0) as u8,
        ]
    })
}

/// Luma histogram equalization blended with the original.
///
/// The luma channel is remapped through its CDF and every color channel is
/// shifted by the same amount as its pixel's luma, keeping hue. The result is
/// then mixed as `original * (1 - t) + equalized * t` with
/// `t = min(intensity, 1)`.
pub fn histogram_equalization(image: &Raster, intensity: f32) -> Raster {
    histogram_equalization_with(image, intensity, EqualizationMode::Luma)
}

/// [`histogram_equalization`] with an explicit rendering mode.
pub fn histogram_equalization_with(
    image: &Raster,
    intensity: f32,
    mode: EqualizationMode,
) -> Raster {
    if image.is_empty() {
        return image.clone();
    }
    let t = intensity.clamp(0.0, 1.0);

    let equalized = match mode {
        EqualizationMode::Luma => {
            let hist = compute_histogram(image);
            let lut = equalization_lut(&hist.luma);
            if lut.is_identity() {
                return image.clone();
            }
            image.map_pixels(|px| {
                let l = pixel_luma(px);
                let delta = lut.map(l) as f32 - l as f32;
                px.map(|v| clamp_u8(v as f32 + delta))
            })
        }
        EqualizationMode::ContrastBoost => enhance_contrast(image, 1.0 + 0.5 * intensity),
    };

    blend(image, &equalized, t).unwrap_or(equalized)
}

/// Pencil sketch rendering.
///
/// 1. grayscale
/// 2. Gaussian blur with radius `max(1, intensity * 3)`
/// 3. edge detection, then invert (dark strokes on white)
/// 4. contrast boost by `1 + intensity`
/// 5. blend onto white by `min(1, intensity * 0.8)`
pub fn pencil_sketch(image: &Raster, intensity: f32) -> Raster {
    let gray = grayscale(image);
    let blurred = gaussian_blur(&gray, (intensity * 3.0).max(1.0));
    let strokes = invert(&edge_detect(&blurred));
    let boosted = enhance_contrast(&strokes, 1.0 + intensity);

    let paper = Raster::filled(image.width, image.height, [255, 255, 255]);
    let sketch = blend(&paper, &boosted, (intensity * 0.8).min(1.0)).unwrap_or(boosted);
    // Strokes are gray; collapse any rounding drift between channels
    grayscale(&sketch)
}

/// Flat colors with dark outlines.
///
/// Edges are detected on the color image, collapsed to luma and inverted so
/// outlines are dark on white. The image is posterized to four levels per
/// channel and multiplied by the outline mask.
pub fn cartoonify(image: &Raster) -> Raster {
    let outlines = invert(&grayscale(&edge_detect(image)));
    let flat = posterize(image, CARTOON_LEVELS);
    multiply(&flat, &outlines).unwrap_or(flat)
}

/// Darken the edges with a linear radial falloff into [`VIGNETTE_FILL`].
///
/// At intensity 1.0 the image is fully replaced by the fill at half the
/// shorter side from the center; higher intensities tighten the radius.
pub fn vignette(image: &Raster, intensity: f32) -> Raster {
    vignette_with(image, intensity, Falloff::Linear)
}

/// [`vignette`] with an explicit falloff shape.
pub fn vignette_with(image: &Raster, intensity: f32, falloff: Falloff) -> Raster {
    if image.is_empty() {
        return image.clone();
    }
    let mask = RadialMask::centered(image.width, image.height, intensity).with_falloff(falloff);
    composite_over(image, VIGNETTE_FILL, &mask)
}

/// Per-channel autocontrast that clips `intensity * 10` percent of samples
/// from each end of every channel's histogram.
pub fn color_balance(image: &Raster, intensity: f32) -> Raster {
    if image.is_empty() {
        return image.clone();
    }
    let hist = compute_histogram(image);
    let cutoff = intensity * 10.0;
    let luts: [ChannelLut; 3] = [
        autocontrast_lut(&hist.red, cutoff),
        autocontrast_lut(&hist.green, cutoff),
        autocontrast_lut(&hist.blue, cutoff),
    ];
    apply_channel_luts(image, &luts)
}

/// Painterly smoothing: a mode filter sized by intensity, then a 1.5x
/// contrast boost.
pub fn oil_painting(image: &Raster, intensity: f32) -> Raster {
    let smoothed = mode_filter(image, window_size(intensity));
    enhance_contrast(&smoothed, 1.5)
}

/// Linear mix `a * (1 - t) + b * t`. `None` when sizes differ.
pub fn blend(a: &Raster, b: &Raster, t: f32) -> Option<Raster> {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 && a.width == b.width && a.height == b.height {
        return Some(a.clone());
    }
    if t == 1.0 && a.width == b.width && a.height == b.height {
        return Some(b.clone());
    }
    a.zip_with(b, |x, y| clamp_u8(x as f32 * (1.0 - t) + y as f32 * t))
}

/// Multiply blend `a * b / 255`. `None` when sizes differ.
pub fn multiply(a: &Raster, b: &Raster) -> Option<Raster> {
    a.zip_with(b, |x, y| ((x as u16 * y as u16 + 127) / 255) as u8)
}

/// Before/after split view sized like `processed`.
///
/// Columns left of `width / 2` come from `original` (black where the original
/// is smaller), the rest from `processed`, with a white divider
/// [`DIVIDER_WIDTH`] pixels wide ending on the split column.
pub fn compare_split(original: &Raster, processed: &Raster) -> Raster {
    let split = processed.width / 2;
    let divider_start = (split + 1).saturating_sub(DIVIDER_WIDTH);
    Raster::from_fn(processed.width, processed.height, |x, y| {
        if (divider_start..=split).contains(&x) {
            [255, 255, 255]
        } else if x < split {
            if x < original.width && y < original.height {
                original.pixel(x, y)
            } else {
                [0, 0, 0]
            }
        } else {
            processed.pixel(x, y)
        }
    })
}
