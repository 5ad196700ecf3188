//! Image rotation with an expanding canvas.
//!
//! Quarter turns are exact pixel permutations. Any other angle uses inverse
//! mapping: for each pixel in the output image, we find the source position
//! it came from and interpolate the neighborhood there.
//!
//! For a clockwise rotation by angle θ (y axis pointing down), the inverse
//! transform is:
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! where `(dx, dy)` is the output pixel center relative to the output center.
//! Areas of the expanded canvas with no source pixel are filled with black.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationFilter {
    /// 2x2 neighborhood; fastest.
    Bilinear,
    /// 4x4 Catmull-Rom cubic.
    #[default]
    Bicubic,
    /// 6x6 windowed sinc; sharpest.
    Lanczos3,
}

impl InterpolationFilter {
    /// Half-width of the filter footprint in pixels.
    fn support(self) -> i64 {
        match self {
            InterpolationFilter::Bilinear => 1,
            InterpolationFilter::Bicubic => 2,
            InterpolationFilter::Lanczos3 => 3,
        }
    }

    /// Filter weight at distance `t` from the sample position.
    fn weight(self, t: f64) -> f64 {
        let t = t.abs();
        match self {
            InterpolationFilter::Bilinear => (1.0 - t).max(0.0),
            InterpolationFilter::Bicubic => {
                // Catmull-Rom (a = -0.5)
                if t < 1.0 {
                    1.5 * t * t * t - 2.5 * t * t + 1.0
                } else if t < 2.0 {
                    -0.5 * t * t * t + 2.5 * t * t - 4.0 * t + 2.0
                } else {
                    0.0
                }
            }
            InterpolationFilter::Lanczos3 => lanczos3(t),
        }
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```
/// use retouch_core::transform::compute_rotated_bounds;
///
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!((w, h), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|, new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise by `angle_degrees` using bicubic interpolation.
///
/// Negative angles rotate counter-clockwise. The canvas grows to hold the
/// whole rotated image.
pub fn rotate(image: &Raster, angle_degrees: f64) -> Raster {
    rotate_with(image, angle_degrees, InterpolationFilter::default())
}

/// Rotate an image clockwise with an explicit interpolation filter.
pub fn rotate_with(image: &Raster, angle_degrees: f64, filter: InterpolationFilter) -> Raster {
    if image.is_empty() || !angle_degrees.is_finite() {
        return image.clone();
    }
    match quarter_turns(angle_degrees) {
        Some(0) => return image.clone(),
        Some(1) => return rotate90(image),
        Some(2) => return rotate180(image),
        Some(3) => return rotate270(image),
        _ => {}
    }

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * 3);

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel center relative to the output center
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let pixel = if src_x < 0.0 || src_y < 0.0 || src_x > src_w || src_y > src_h {
                [0, 0, 0]
            } else {
                sample(image, src_x - 0.5, src_y - 0.5, filter)
            };
            output.extend_from_slice(&pixel);
        }
    }

    Raster {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Number of clockwise quarter turns if the angle is a multiple of 90 degrees.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < 0.001 {
        Some(turns as u32 % 4)
    } else {
        None
    }
}

fn rotate90(image: &Raster) -> Raster {
    let h = image.height;
    Raster::from_fn(image.height, image.width, |x, y| image.pixel(y, h - 1 - x))
}

fn rotate180(image: &Raster) -> Raster {
    let (w, h) = (image.width, image.height);
    Raster::from_fn(w, h, |x, y| image.pixel(w - 1 - x, h - 1 - y))
}

fn rotate270(image: &Raster) -> Raster {
    let w = image.width;
    Raster::from_fn(image.height, image.width, |x, y| image.pixel(w - 1 - y, x))
}

/// Interpolate at continuous index-space position `(x, y)`.
///
/// Taps outside the image reuse the nearest edge pixel.
fn sample(image: &Raster, x: f64, y: f64, filter: InterpolationFilter) -> [u8; 3] {
    let support = filter.support();
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in (y0 - support + 1)..=(y0 + support) {
        let wy = filter.weight(y - ky as f64);
        if wy == 0.0 {
            continue;
        }
        for kx in (x0 - support + 1)..=(x0 + support) {
            let weight = wy * filter.weight(x - kx as f64);
            if weight == 0.0 {
                continue;
            }
            let px = image.pixel_clamped(kx, ky);
            for i in 0..3 {
                sum[i] += px[i] as f64 * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return image.pixel_clamped(x.round() as i64, y.round() as i64);
    }

    let mut result = [0u8; 3];
    for i in 0..3 {
        result[i] = (sum[i] / weight_sum).round().clamp(0.0, 255.0) as u8;
    }
    result
}

/// Lanczos kernel with a = 3.
#[inline]
fn lanczos3(x: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= 3.0 {
        return 0.0;
    }
    let pi_x = PI * x;
    let pi_x_3 = pi_x / 3.0;
    (pi_x.sin() / pi_x) * (pi_x_3.sin() / pi_x_3)
}
