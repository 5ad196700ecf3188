//! WASM bindings for geometric operations.
//!
//! Each function takes a source image and returns a new one; the source is
//! never modified. Degenerate requests return a copy of the source.

use crate::types::JsRaster;
use retouch_core::transform::{self, InterpolationFilter};
use wasm_bindgen::prelude::*;

/// Convert a u8 filter value to the core interpolation filter.
///
/// Values:
/// - 0 = Bilinear (fastest)
/// - 1 = Bicubic
/// - 2 = Lanczos3 (sharpest, slowest)
///
/// Any other value defaults to Bicubic.
pub(crate) fn filter_from_u8(value: u8) -> InterpolationFilter {
    match value {
        0 => InterpolationFilter::Bilinear,
        2 => InterpolationFilter::Lanczos3,
        _ => InterpolationFilter::Bicubic,
    }
}

/// Rotate an image around its center.
///
/// The canvas expands to hold the whole rotated image; uncovered corners
/// are black. Multiples of 90 degrees are exact.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `filter` - Interpolation filter (see `filter_from_u8`)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = rotate(sourceImage, 15.0, 0); // bilinear
/// const exported = rotate(sourceImage, 15.0, 2); // lanczos
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsRaster, angle_degrees: f64, filter: u8) -> JsRaster {
    let result = transform::rotate_with(&image.to_raster(), angle_degrees, filter_from_u8(filter));
    JsRaster::from_raster(result)
}

/// Mirror an image left to right.
#[wasm_bindgen]
pub fn flip_horizontal(image: &JsRaster) -> JsRaster {
    JsRaster::from_raster(transform::flip_horizontal(&image.to_raster()))
}

/// Mirror an image top to bottom.
#[wasm_bindgen]
pub fn flip_vertical(image: &JsRaster) -> JsRaster {
    JsRaster::from_raster(transform::flip_vertical(&image.to_raster()))
}

/// Crop to the pixel rectangle `[left, right) x [top, bottom)`.
///
/// Coordinates are clamped to the image bounds.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Keep a 100x50 region starting at (10, 20)
/// const cropped = crop(sourceImage, 10, 20, 110, 70);
/// ```
#[wasm_bindgen]
pub fn crop(image: &JsRaster, left: i32, top: i32, right: i32, bottom: i32) -> JsRaster {
    let result = transform::crop(
        &image.to_raster(),
        left as i64,
        top as i64,
        right as i64,
        bottom as i64,
    );
    JsRaster::from_raster(result)
}

/// Resize to the given dimensions with Lanczos3 resampling.
///
/// With `keep_aspect` the image is scaled to fit inside `width x height`.
#[wasm_bindgen]
pub fn resize(image: &JsRaster, width: i32, height: i32, keep_aspect: bool) -> JsRaster {
    let result = transform::resize(&image.to_raster(), width as i64, height as i64, keep_aspect);
    JsRaster::from_raster(result)
}

/// Scale both dimensions by `percent / 100`.
#[wasm_bindgen]
pub fn resize_by_percentage(image: &JsRaster, percent: f64) -> JsRaster {
    JsRaster::from_raster(transform::resize_by_percentage(&image.to_raster(), percent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsRaster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 100]);
            }
        }
        JsRaster::new(width, height, pixels)
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), InterpolationFilter::Bilinear);
        assert_eq!(filter_from_u8(1), InterpolationFilter::Bicubic);
        assert_eq!(filter_from_u8(2), InterpolationFilter::Lanczos3);
        assert_eq!(filter_from_u8(255), InterpolationFilter::Bicubic);
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let out = rotate(&gradient(20, 10), 90.0, 1);
        assert_eq!(out.width(), 10);
        assert_eq!(out.height(), 20);
    }

    #[test]
    fn test_rotate_zero_preserves_pixels() {
        let src = gradient(8, 6);
        let out = rotate(&src, 0.0, 0);
        assert_eq!(out.pixels(), src.pixels());
    }

    #[test]
    fn test_flip_horizontal_twice() {
        let src = gradient(7, 3);
        let out = flip_horizontal(&flip_horizontal(&src));
        assert_eq!(out.pixels(), src.pixels());
    }

    #[test]
    fn test_flip_vertical_moves_rows() {
        let out = flip_vertical(&gradient(2, 3));
        // Top row now comes from y = 2
        assert_eq!(&out.pixels()[0..3], &[0, 20, 100]);
    }

    #[test]
    fn test_crop_region() {
        let out = crop(&gradient(10, 10), 2, 3, 7, 5);
        assert_eq!(out.width(), 5);
        assert_eq!(out.height(), 2);
        assert_eq!(&out.pixels()[0..3], &[20, 30, 100]);
    }

    #[test]
    fn test_resize_keep_aspect() {
        let out = resize(&gradient(20, 10), 10, 10, true);
        assert_eq!((out.width(), out.height()), (10, 5));
    }

    #[test]
    fn test_resize_by_percentage() {
        let out = resize_by_percentage(&gradient(20, 10), 50.0);
        assert_eq!((out.width(), out.height()), (10, 5));
    }
}
