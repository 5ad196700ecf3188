//! Neighborhood filters: convolutions and rank (order-statistic) filters.
//!
//! All filters sample outside the image by clamping to the nearest edge
//! pixel, treat each channel independently and return a new raster.
//!
//! ## Window sizes
//! Rank filters and morphology take an odd square window. Intensity-driven
//! callers derive it with [`window_size`].

use crate::raster::{clamp_u8, Raster};

/// A 3x3 convolution kernel with a divisor and a bias.
///
/// `out = sum(weights * samples) / scale + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    /// Weights in row-major order.
    pub weights: [f32; 9],
    /// Divisor applied to the weighted sum.
    pub scale: f32,
    /// Value added after scaling.
    pub offset: f32,
}

impl Kernel3 {
    /// Center-heavy sharpening kernel. Weights sum to `scale`, so flat
    /// regions are unchanged.
    pub const SHARPEN: Kernel3 = Kernel3 {
        weights: [-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0],
        scale: 16.0,
        offset: 0.0,
    };

    /// Eight-neighbor Laplacian. Flat regions go to 0, edges light up.
    pub const FIND_EDGES: Kernel3 = Kernel3 {
        weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
        scale: 1.0,
        offset: 0.0,
    };

    /// Directional relief kernel biased to mid-gray.
    pub const EMBOSS: Kernel3 = Kernel3 {
        weights: [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        scale: 1.0,
        offset: 128.0,
    };
}

/// Which order statistic a rank filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Min,
    Max,
    Median,
    /// Most frequent value; the center sample is kept when nothing repeats.
    Mode,
}

/// Odd window size for an intensity: `floor(intensity * 5)`, at least 1,
/// rounded up to the next odd number.
pub fn window_size(intensity: f32) -> u32 {
    let size = ((intensity * 5.0) + 1e-4).floor().max(1.0) as u32;
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Apply a 3x3 kernel to every channel.
pub fn convolve3(image: &Raster, kernel: &Kernel3) -> Raster {
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for y in 0..image.height as i64 {
        for x in 0..image.width as i64 {
            let mut acc = [0.0f32; 3];
            for ky in 0..3i64 {
                for kx in 0..3i64 {
                    let w = kernel.weights[(ky * 3 + kx) as usize];
                    if w == 0.0 {
                        continue;
                    }
                    let px = image.pixel_clamped(x + kx - 1, y + ky - 1);
                    for c in 0..3 {
                        acc[c] += w * px[c] as f32;
                    }
                }
            }
            for value in acc {
                pixels.push(clamp_u8(value / kernel.scale + kernel.offset));
            }
        }
    }
    Raster {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Gaussian blur with standard deviation `radius` pixels.
///
/// Separable: one horizontal and one vertical pass, with full float
/// precision between passes. A non-positive or NaN radius returns a copy;
/// radii above the longer image side are capped to it.
pub fn gaussian_blur(image: &Raster, radius: f32) -> Raster {
    if radius.is_nan() || radius <= 0.0 || image.is_empty() {
        return image.clone();
    }
    let radius = radius.min(image.width.max(image.height) as f32);
    let weights = gaussian_weights(radius);
    let reach = (weights.len() / 2) as i64;
    let (w, h) = (image.width as i64, image.height as i64);

    let mut horizontal = vec![0.0f32; image.pixels.len()];
    for y in 0..h {
        for x in 0..w {
            let dst = ((y * w + x) * 3) as usize;
            for (i, weight) in weights.iter().enumerate() {
                let px = image.pixel_clamped(x + i as i64 - reach, y);
                for c in 0..3 {
                    horizontal[dst + c] += weight * px[c] as f32;
                }
            }
        }
    }

    let mut pixels = Vec::with_capacity(image.pixels.len());
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (i, weight) in weights.iter().enumerate() {
                let sy = (y + i as i64 - reach).clamp(0, h - 1);
                let src = ((sy * w + x) * 3) as usize;
                for c in 0..3 {
                    acc[c] += weight * horizontal[src + c];
                }
            }
            pixels.extend(acc.iter().map(|&v| clamp_u8(v)));
        }
    }

    Raster {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Normalized 1-D Gaussian weights covering three standard deviations.
fn gaussian_weights(sigma: f32) -> Vec<f32> {
    let reach = (sigma * 3.0).ceil().max(1.0) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-reach..=reach)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Apply an order-statistic filter over a `size` x `size` window.
///
/// `size` is forced odd and capped at twice the longer image side plus one;
/// a size of 1 returns a copy.
pub fn rank_filter(image: &Raster, size: u32, rank: Rank) -> Raster {
    let cap = image.width.max(image.height).saturating_mul(2).saturating_add(1);
    let size = size.min(cap);
    let size = if size % 2 == 0 { size + 1 } else { size };
    if size <= 1 || image.is_empty() {
        return image.clone();
    }
    let reach = (size / 2) as i64;
    match rank {
        Rank::Min => separable_extremum(image, reach, u8::min),
        Rank::Max => separable_extremum(image, reach, u8::max),
        Rank::Median => window_filter(image, reach, |samples, _| {
            let mid = samples.len() / 2;
            *samples.select_nth_unstable(mid).1
        }),
        Rank::Mode => window_filter(image, reach, most_frequent),
    }
}

/// Min and max over a square window decompose into a row pass and a column pass.
fn separable_extremum(image: &Raster, reach: i64, pick: fn(u8, u8) -> u8) -> Raster {
    let (w, h) = (image.width as i64, image.height as i64);
    let mut rows = vec![0u8; image.pixels.len()];
    for y in 0..h {
        for x in 0..w {
            let dst = ((y * w + x) * 3) as usize;
            let mut best = image.pixel_clamped(x - reach, y);
            for dx in -reach + 1..=reach {
                let px = image.pixel_clamped(x + dx, y);
                for c in 0..3 {
                    best[c] = pick(best[c], px[c]);
                }
            }
            rows[dst..dst + 3].copy_from_slice(&best);
        }
    }

    let mut pixels = vec![0u8; image.pixels.len()];
    for y in 0..h {
        for x in 0..w {
            let dst = ((y * w + x) * 3) as usize;
            for c in 0..3 {
                let mut best = rows[(((y - reach).clamp(0, h - 1) * w + x) * 3) as usize + c];
                for dy in -reach + 1..=reach {
                    let sy = (y + dy).clamp(0, h - 1);
                    best = pick(best, rows[((sy * w + x) * 3) as usize + c]);
                }
                pixels[dst + c] = best;
            }
        }
    }

    Raster {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Gather each channel's window samples and reduce them with `select`.
///
/// `select` receives the samples and the center sample.
fn window_filter(image: &Raster, reach: i64, mut select: impl FnMut(&mut [u8], u8) -> u8) -> Raster {
    let side = (reach * 2 + 1) as usize;
    let mut samples: [Vec<u8>; 3] = std::array::from_fn(|_| Vec::with_capacity(side * side));
    let mut pixels = Vec::with_capacity(image.pixels.len());

    for y in 0..image.height as i64 {
        for x in 0..image.width as i64 {
            for channel in samples.iter_mut() {
                channel.clear();
            }
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let px = image.pixel_clamped(x + dx, y + dy);
                    for c in 0..3 {
                        samples[c].push(px[c]);
                    }
                }
            }
            let center = image.pixel(x as u32, y as u32);
            for c in 0..3 {
                pixels.push(select(&mut samples[c], center[c]));
            }
        }
    }

    Raster {
        width: image.width,
        height: image.height,
        pixels,
    }
}

fn most_frequent(samples: &mut [u8], center: u8) -> u8 {
    let mut counts = [0u16; 256];
    for &v in samples.iter() {
        counts[v as usize] += 1;
    }
    let mut best = center;
    let mut best_count = 1u16;
    for (value, &count) in counts.iter().enumerate() {
        if count > best_count {
            best = value as u8;
            best_count = count;
        }
    }
    best
}

/// Local minimum filter.
pub fn erode(image: &Raster, size: u32) -> Raster {
    rank_filter(image, size, Rank::Min)
}

/// Local maximum filter.
pub fn dilate(image: &Raster, size: u32) -> Raster {
    rank_filter(image, size, Rank::Max)
}

/// Erosion followed by dilation; removes small bright details.
pub fn opening(image: &Raster, size: u32) -> Raster {
    dilate(&erode(image, size), size)
}

/// Dilation followed by erosion; fills small dark gaps.
pub fn closing(image: &Raster, size: u32) -> Raster {
    erode(&dilate(image, size), size)
}

pub fn median_filter(image: &Raster, size: u32) -> Raster {
    rank_filter(image, size, Rank::Median)
}

pub fn mode_filter(image: &Raster, size: u32) -> Raster {
    rank_filter(image, size, Rank::Mode)
}

/// Number of sharpen passes for an intensity: `max(1, round(intensity))`
/// above 1.0, otherwise one.
pub fn sharpen_passes(intensity: f32) -> u32 {
    if intensity > 1.0 {
        (intensity.round() as u32).max(1)
    } else {
        1
    }
}

/// Apply [`Kernel3::SHARPEN`] once per pass from [`sharpen_passes`].
pub fn sharpen(image: &Raster, intensity: f32) -> Raster {
    let mut out = convolve3(image, &Kernel3::SHARPEN);
    for _ in 1..sharpen_passes(intensity) {
        out = convolve3(&out, &Kernel3::SHARPEN);
    }
    out
}

pub fn edge_detect(image: &Raster) -> Raster {
    convolve3(image, &Kernel3::FIND_EDGES)
}

pub fn emboss(image: &Raster) -> Raster {
    convolve3(image, &Kernel3::EMBOSS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(value: u8) -> Raster {
        Raster::filled(7, 5, [value, value, value])
    }

    /// Black image with one white pixel in the middle.
    fn dot() -> Raster {
        Raster::from_fn(9, 9, |x, y| if x == 4 && y == 4 { [255; 3] } else { [0; 3] })
    }

    #[test]
    fn test_window_size() {
        assert_eq!(window_size(0.1), 1);
        assert_eq!(window_size(0.2), 1);
        assert_eq!(window_size(0.4), 3);
        assert_eq!(window_size(0.6), 3);
        assert_eq!(window_size(1.0), 5);
        assert_eq!(window_size(2.0), 11);
    }

    #[test]
    fn test_sharpen_passes() {
        assert_eq!(sharpen_passes(0.1), 1);
        assert_eq!(sharpen_passes(1.0), 1);
        assert_eq!(sharpen_passes(1.4), 1);
        assert_eq!(sharpen_passes(1.5), 2);
        assert_eq!(sharpen_passes(2.0), 2);
    }

    #[test]
    fn test_flat_regions_survive_sharpen_and_blur() {
        let img = flat(90);
        assert_eq!(sharpen(&img, 2.0), img);
        assert_eq!(gaussian_blur(&img, 5.0), img);
    }

    #[test]
    fn test_edges_of_flat_image_are_black() {
        assert!(edge_detect(&flat(200)).pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_emboss_flat_is_mid_gray() {
        assert!(emboss(&flat(40)).pixels.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_edge_detect_highlights_dot() {
        let out = edge_detect(&dot());
        assert_eq!(out.pixel(4, 4), [255; 3]);
        // Neighbors see -255 and clamp to 0
        assert_eq!(out.pixel(3, 4), [0; 3]);
    }

    #[test]
    fn test_gaussian_blur_spreads_dot() {
        let out = gaussian_blur(&dot(), 1.0);
        let center = out.pixel(4, 4)[0];
        let neighbor = out.pixel(5, 4)[0];
        assert!(center < 255);
        assert!(neighbor > 0);
        assert!(center > neighbor);
    }

    #[test]
    fn test_gaussian_weights_normalized() {
        let weights = gaussian_weights(2.5);
        let sum: f32 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(weights.len() % 2, 1);
    }

    #[test]
    fn test_erode_removes_dot_dilate_grows_it() {
        let eroded = erode(&dot(), 3);
        assert!(eroded.pixels.iter().all(|&v| v == 0));

        let dilated = dilate(&dot(), 3);
        for y in 3..=5 {
            for x in 3..=5 {
                assert_eq!(dilated.pixel(x, y), [255; 3]);
            }
        }
        assert_eq!(dilated.pixel(2, 4), [0; 3]);
    }

    #[test]
    fn test_opening_and_closing() {
        // Opening removes an isolated bright pixel
        assert!(opening(&dot(), 3).pixels.iter().all(|&v| v == 0));

        // Closing fills an isolated dark pixel
        let hole = invert_image(&dot());
        assert!(closing(&hole, 3).pixels.iter().all(|&v| v == 255));
    }

    fn invert_image(img: &Raster) -> Raster {
        img.map_pixels(|[r, g, b]| [255 - r, 255 - g, 255 - b])
    }

    #[test]
    fn test_median_removes_salt_noise() {
        let out = median_filter(&dot(), 3);
        assert_eq!(out.pixel(4, 4), [0; 3]);
    }

    #[test]
    fn test_mode_keeps_center_when_nothing_repeats() {
        let img = Raster::from_fn(3, 3, |x, y| {
            let v = (y * 3 + x) as u8 * 10;
            [v, v, v]
        });
        let out = mode_filter(&img, 3);
        // Center window has nine distinct values
        assert_eq!(out.pixel(1, 1), [40; 3]);
    }

    #[test]
    fn test_mode_picks_majority() {
        let out = mode_filter(&dot(), 3);
        assert_eq!(out.pixel(4, 4), [0; 3]);
    }

    #[test]
    fn test_size_one_is_identity() {
        let img = dot();
        assert_eq!(rank_filter(&img, 1, Rank::Median), img);
        assert_eq!(erode(&img, 0), img);
    }

    #[test]
    fn test_huge_window_is_capped() {
        let img = dot();
        // 9x9 image caps the window at 19
        assert_eq!(dilate(&img, u32::MAX - 1), dilate(&img, 19));
        assert_eq!(median_filter(&img, u32::MAX), median_filter(&img, 19));
        assert!(dilate(&img, u32::MAX).pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_huge_or_nan_blur_radius() {
        let img = dot();
        assert_eq!(gaussian_blur(&img, f32::MAX), gaussian_blur(&img, 9.0));
        assert_eq!(gaussian_blur(&img, f32::NAN), img);
    }

    proptest! {
        /// Property: erosion never brightens and dilation never darkens.
        #[test]
        fn prop_morphology_ordering(seed in 0u32..1000, size in 1u32..6) {
            let img = Raster::from_fn(6, 5, |x, y| {
                let v = ((x * 31 + y * 17 + seed) % 256) as u8;
                [v, v.wrapping_mul(3), v / 2]
            });
            let eroded = erode(&img, size);
            let dilated = dilate(&img, size);
            for i in 0..img.pixels.len() {
                prop_assert!(eroded.pixels[i] <= img.pixels[i]);
                prop_assert!(dilated.pixels[i] >= img.pixels[i]);
            }
        }
    }
}
