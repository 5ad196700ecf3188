//! Resampling to new dimensions.
//!
//! Uses the `image` crate's Lanczos3 filter. Requests that would produce a
//! zero or negative dimension return the input unchanged.

use image::imageops::FilterType;

use crate::raster::Raster;

/// Resize an image.
///
/// # Arguments
///
/// * `width` / `height` - Target size in pixels; must both be positive
/// * `keep_aspect` - When true the image is scaled by
///   `min(width / src_width, height / src_height)` so it fits inside the
///   target box; the resulting dimensions are truncated
///
/// # Returns
///
/// The resized image, or a copy of the input when the target is degenerate.
pub fn resize(image: &Raster, width: i64, height: i64, keep_aspect: bool) -> Raster {
    match resize_target(image, width, height, keep_aspect) {
        Some((w, h)) => resample(image, w, h),
        None => image.clone(),
    }
}

/// Scale both dimensions by `percent / 100`, truncating.
///
/// Non-positive or non-finite percentages return the input unchanged.
pub fn resize_by_percentage(image: &Raster, percent: f64) -> Raster {
    match percentage_target(image, percent) {
        Some((w, h)) => resample(image, w, h),
        None => image.clone(),
    }
}

/// Output size of [`resize`], or `None` when the request collapses a side
/// to zero or overflows `u32`.
pub fn resize_target(image: &Raster, width: i64, height: i64, keep_aspect: bool) -> Option<(u32, u32)> {
    if width <= 0 || height <= 0 || image.is_empty() {
        return None;
    }
    if !keep_aspect {
        return checked_dimensions(width, height);
    }
    let scale = (width as f64 / image.width as f64).min(height as f64 / image.height as f64);
    checked_dimensions(
        (image.width as f64 * scale) as i64,
        (image.height as f64 * scale) as i64,
    )
}

/// Output size of [`resize_by_percentage`], with the same `None` cases as
/// [`resize_target`].
pub fn percentage_target(image: &Raster, percent: f64) -> Option<(u32, u32)> {
    if !percent.is_finite() || percent <= 0.0 || image.is_empty() {
        return None;
    }
    let scale = percent / 100.0;
    checked_dimensions(
        (image.width as f64 * scale) as i64,
        (image.height as f64 * scale) as i64,
    )
}

fn checked_dimensions(width: i64, height: i64) -> Option<(u32, u32)> {
    let w = u32::try_from(width).ok().filter(|&w| w > 0)?;
    let h = u32::try_from(height).ok().filter(|&h| h > 0)?;
    Some((w, h))
}

fn resample(image: &Raster, width: u32, height: u32) -> Raster {
    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return image.clone();
    }

    match image.to_rgb_image() {
        Some(rgb) => Raster::from_rgb_image(image::imageops::resize(
            &rgb,
            width,
            height,
            FilterType::Lanczos3,
        )),
        None => image.clone(),
    }
}
