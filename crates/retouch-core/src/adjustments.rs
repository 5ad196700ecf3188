//! Per-pixel tone and color adjustments.
//!
//! Every function here is a pure point operation: it reads one pixel and
//! writes one pixel, never looking at neighbors. Value-only mappings are
//! compiled into a [`ChannelLut`] first.
//!
//! ## Formulas
//! - Brightness: `v * (1 + brightness / 100)`
//! - Contrast: `(v - 128) * contrast + 128`
//! - Saturation: `luma + (v - luma) * factor`
//! - Threshold: `luma > level ? 255 : 0`

use serde::{Deserialize, Serialize};

use crate::histogram::compute_histogram;
use crate::luminance::{luma, pixel_luma};
use crate::lut::ChannelLut;
use crate::raster::{clamp_u8, Raster};

/// How hue shifts are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HueMode {
    /// Coarse three-bucket channel permutation.
    ///
    /// Shifts in (0, 120) map (R, G, B) to (B, R, G), shifts in [120, 240) map
    /// it to (G, B, R), and shifts in [240, 360) leave the image unchanged.
    /// This is an approximation, not a hue rotation: intermediate angles snap
    /// to one of three outcomes.
    #[default]
    Permute,
    /// Continuous rotation of the HSV hue angle.
    Rotate,
}

/// Adjust brightness, then contrast.
///
/// # Arguments
/// * `brightness` - -100 to 100; scales every sample by `1 + brightness / 100`
/// * `contrast` - 0.1 to 3.0; stretches samples around 128
///
/// The brightness result is rounded to 8 bits before contrast is applied.
pub fn adjust_brightness_contrast(image: &Raster, brightness: i32, contrast: f32) -> Raster {
    // Early exit: both steps are identity at these values
    if brightness == 0 && contrast == 1.0 {
        return image.clone();
    }
    brightness_contrast_lut(brightness, contrast).apply(image)
}

/// The lookup table behind [`adjust_brightness_contrast`].
pub fn brightness_contrast_lut(brightness: i32, contrast: f32) -> ChannelLut {
    let factor = 1.0 + brightness as f32 / 100.0;
    ChannelLut::from_fn(|v| {
        let brightened = clamp_u8(v as f32 * factor) as f32;
        clamp_u8((brightened - 128.0) * contrast + 128.0)
    })
}

/// Scale each pixel's chroma distance from its luma.
///
/// `factor` 0.0 gives grayscale, 1.0 is identity, above 1.0 amplifies color.
/// Luma is preserved except where a channel clips; clipped results cannot be
/// undone by applying `1 / factor`.
pub fn adjust_saturation(image: &Raster, factor: f32) -> Raster {
    if factor == 1.0 {
        return image.clone();
    }
    image.map_pixels(|[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let gray = luma(r, g, b);
        [
            clamp_u8(gray + (r - gray) * factor),
            clamp_u8(gray + (g - gray) * factor),
            clamp_u8(gray + (b - gray) * factor),
        ]
    })
}

/// Shift hue using the default [`HueMode::Permute`] approximation.
pub fn adjust_hue(image: &Raster, shift_degrees: i32) -> Raster {
    adjust_hue_with(image, shift_degrees, HueMode::Permute)
}

/// Shift hue by `shift_degrees` using the chosen rendering.
///
/// A shift that is a multiple of 360 is identity in both modes.
pub fn adjust_hue_with(image: &Raster, shift_degrees: i32, mode: HueMode) -> Raster {
    let shift = shift_degrees.rem_euclid(360);
    if shift == 0 {
        return image.clone();
    }
    match mode {
        HueMode::Permute => match shift {
            1..=119 => image.map_pixels(|[r, g, b]| [b, r, g]),
            120..=239 => image.map_pixels(|[r, g, b]| [g, b, r]),
            _ => image.clone(),
        },
        HueMode::Rotate => image.map_pixels(|px| rotate_hue(px, shift as f32)),
    }
}

/// Convert to luma and binarize: samples strictly above `level` become 255.
pub fn threshold(image: &Raster, level: u8) -> Raster {
    image.map_pixels(|px| {
        let v = if pixel_luma(px) > level { 255 } else { 0 };
        [v, v, v]
    })
}

/// Replace every sample with `255 - v`.
pub fn invert(image: &Raster) -> Raster {
    ChannelLut::from_fn(|v| 255 - v).apply(image)
}

/// Replace every pixel with its luma on all three channels.
pub fn grayscale(image: &Raster) -> Raster {
    image.map_pixels(|px| {
        let l = pixel_luma(px);
        [l, l, l]
    })
}

/// Quantize each channel to `levels` evenly spaced values (2-256).
pub fn posterize(image: &Raster, levels: u16) -> Raster {
    let levels = levels.clamp(2, 256) as f32;
    let step = 255.0 / (levels - 1.0);
    let divisor = 256.0 / levels;
    ChannelLut::from_fn(|v| ((v as f32 / divisor).floor() * step).round().clamp(0.0, 255.0) as u8)
        .apply(image)
}

/// Stretch samples around the image's mean luma.
///
/// Unlike the fixed-midpoint contrast in [`adjust_brightness_contrast`], the
/// pivot adapts to the image, so mostly-light images stay light.
pub fn enhance_contrast(image: &Raster, factor: f32) -> Raster {
    if factor == 1.0 || image.is_empty() {
        return image.clone();
    }
    let mean = mean_luma(image);
    ChannelLut::from_fn(|v| clamp_u8(mean + (v as f32 - mean) * factor)).apply(image)
}

/// Mean luma, rounded to the nearest integer level.
fn mean_luma(image: &Raster) -> f32 {
    let hist = compute_histogram(image);
    let total = hist.total();
    if total == 0 {
        return 0.0;
    }
    let sum: u64 = hist
        .luma
        .iter()
        .enumerate()
        .map(|(v, &c)| v as u64 * c as u64)
        .sum();
    (sum as f64 / total as f64).round() as f32
}

/// Rotate a pixel's HSV hue by `degrees`, keeping saturation and value.
fn rotate_hue([r, g, b]: [u8; 3], degrees: f32) -> [u8; 3] {
    let (h, s, v) = rgb_to_hsv(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let (r, g, b) = hsv_to_rgb((h + degrees).rem_euclid(360.0), s, v);
    [clamp_u8(r * 255.0), clamp_u8(g * 255.0), clamp_u8(b * 255.0)]
}

fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Helper to create a gradient test image
    fn gradient(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            [
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                ((x + y) * 7 % 256) as u8,
            ]
        })
    }

    // ===== Brightness / Contrast =====

    #[test]
    fn test_brightness_contrast_identity() {
        let img = gradient(16, 16);
        assert_eq!(adjust_brightness_contrast(&img, 0, 1.0), img);
        assert!(brightness_contrast_lut(0, 1.0).is_identity());
    }

    #[test]
    fn test_brightness_plus_fifty_scales_by_one_and_a_half() {
        let img = Raster::from_fn(100, 100, |x, y| [(x * 2) as u8, (y * 2) as u8, 100]);
        let out = adjust_brightness_contrast(&img, 50, 1.0);
        for (src, dst) in img.pixels.iter().zip(&out.pixels) {
            let expected = (*src as f32 * 1.5).round().min(255.0) as u8;
            assert_eq!(*dst, expected);
        }
        assert_eq!(out.pixel(0, 0)[2], 150);
    }

    #[test]
    fn test_brightness_minus_hundred_is_black() {
        let img = gradient(8, 8);
        let out = adjust_brightness_contrast(&img, -100, 1.0);
        assert!(out.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_contrast_pivots_on_128() {
        let img = Raster::new(3, 1, vec![64, 64, 64, 128, 128, 128, 192, 192, 192]).unwrap();
        let out = adjust_brightness_contrast(&img, 0, 2.0);
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
        assert_eq!(out.pixel(1, 0), [128, 128, 128]);
        assert_eq!(out.pixel(2, 0), [255, 255, 255]);
    }

    #[test]
    fn test_brightness_applied_before_contrast() {
        // 100 * 1.2 = 120, then (120 - 128) * 2 + 128 = 112
        let img = Raster::filled(1, 1, [100, 100, 100]);
        let out = adjust_brightness_contrast(&img, 20, 2.0);
        assert_eq!(out.pixel(0, 0), [112, 112, 112]);
    }

    // ===== Saturation =====

    #[test]
    fn test_saturation_zero_is_grayscale() {
        let img = gradient(10, 10);
        let out = adjust_saturation(&img, 0.0);
        assert_eq!(out, grayscale(&img));
        for chunk in out.pixels.chunks_exact(3) {
            assert_eq!(chunk[0], chunk[1]);
            assert_eq!(chunk[1], chunk[2]);
        }
    }

    #[test]
    fn test_saturation_one_is_identity() {
        let img = gradient(10, 10);
        assert_eq!(adjust_saturation(&img, 1.0), img);
    }

    #[test]
    fn test_saturation_preserves_luma() {
        let img = Raster::filled(1, 1, [120, 128, 136]);
        let out = adjust_saturation(&img, 1.8);
        let before = pixel_luma(img.pixel(0, 0)) as i32;
        let after = pixel_luma(out.pixel(0, 0)) as i32;
        assert!((before - after).abs() <= 1);
        assert!(out.pixel(0, 0)[2] > 136, "Blue should move away from gray");
    }

    #[test]
    fn test_saturation_round_trip_without_clipping() {
        let img = Raster::filled(1, 1, [120, 128, 136]);
        let back = adjust_saturation(&adjust_saturation(&img, 2.0), 0.5);
        for (a, b) in img.pixels.iter().zip(&back.pixels) {
            assert!((*a as i32 - *b as i32).abs() <= 2);
        }
    }

    // ===== Hue =====

    #[test]
    fn test_hue_permutation_buckets() {
        let img = Raster::filled(1, 1, [10, 20, 30]);
        assert_eq!(adjust_hue(&img, 60).pixel(0, 0), [30, 10, 20]);
        assert_eq!(adjust_hue(&img, 119).pixel(0, 0), [30, 10, 20]);
        assert_eq!(adjust_hue(&img, 120).pixel(0, 0), [20, 30, 10]);
        assert_eq!(adjust_hue(&img, 239).pixel(0, 0), [20, 30, 10]);
        assert_eq!(adjust_hue(&img, 240).pixel(0, 0), [10, 20, 30]);
        assert_eq!(adjust_hue(&img, 300).pixel(0, 0), [10, 20, 30]);
    }

    #[test]
    fn test_hue_full_turn_is_identity() {
        let img = gradient(6, 6);
        assert_eq!(adjust_hue(&img, 0), img);
        assert_eq!(adjust_hue(&img, 360), img);
        assert_eq!(adjust_hue_with(&img, 360, HueMode::Rotate), img);
    }

    #[test]
    fn test_hue_rotate_red_to_green() {
        let img = Raster::filled(1, 1, [255, 0, 0]);
        let out = adjust_hue_with(&img, 120, HueMode::Rotate);
        assert_eq!(out.pixel(0, 0), [0, 255, 0]);
    }

    #[test]
    fn test_hue_rotate_keeps_gray() {
        let img = Raster::filled(1, 1, [90, 90, 90]);
        let out = adjust_hue_with(&img, 77, HueMode::Rotate);
        assert_eq!(out.pixel(0, 0), [90, 90, 90]);
    }

    // ===== Threshold / Invert / Posterize =====

    #[test]
    fn test_threshold_mid_gray_at_128_is_black() {
        let img = Raster::filled(4, 4, [128, 128, 128]);
        let out = threshold(&img, 128);
        assert!(out.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_threshold_above_level_is_white() {
        let img = Raster::filled(2, 2, [129, 129, 129]);
        let out = threshold(&img, 128);
        assert!(out.pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_invert() {
        let img = Raster::filled(1, 1, [0, 100, 255]);
        assert_eq!(invert(&img).pixel(0, 0), [255, 155, 0]);
    }

    #[test]
    fn test_posterize_four_levels() {
        let img = Raster::new(4, 1, vec![10, 10, 10, 70, 70, 70, 150, 150, 150, 250, 250, 250]).unwrap();
        let out = posterize(&img, 4);
        assert_eq!(out.pixel(0, 0)[0], 0);
        assert_eq!(out.pixel(1, 0)[0], 85);
        assert_eq!(out.pixel(2, 0)[0], 170);
        assert_eq!(out.pixel(3, 0)[0], 255);
    }

    #[test]
    fn test_enhance_contrast_uniform_image_unchanged() {
        let img = Raster::filled(5, 5, [77, 77, 77]);
        assert_eq!(enhance_contrast(&img, 1.5), img);
    }

    #[test]
    fn test_enhance_contrast_spreads_values() {
        let img = Raster::new(2, 1, vec![100, 100, 100, 140, 140, 140]).unwrap();
        let out = enhance_contrast(&img, 2.0);
        // Mean is 120: 100 -> 80, 140 -> 160
        assert_eq!(out.pixel(0, 0), [80, 80, 80]);
        assert_eq!(out.pixel(1, 0), [160, 160, 160]);
    }

    proptest! {
        /// Property: default brightness and contrast never change a pixel.
        #[test]
        fn prop_brightness_contrast_identity(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let img = Raster::filled(2, 2, [r, g, b]);
            prop_assert_eq!(adjust_brightness_contrast(&img, 0, 1.0), img.clone());
            prop_assert_eq!(brightness_contrast_lut(0, 1.0).apply(&img), img);
        }

        /// Property: double inversion is identity.
        #[test]
        fn prop_invert_involution(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let img = Raster::filled(2, 1, [r, g, b]);
            prop_assert_eq!(invert(&invert(&img)), img);
        }
    }
}
