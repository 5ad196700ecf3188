//! Rectangular cropping in pixel coordinates.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - `right` and `bottom` are exclusive edges
//! - Coordinates outside the image are clamped into `[0, width] x [0, height]`

use crate::raster::Raster;

/// Crop an image to the rectangle `[left, right) x [top, bottom)`.
///
/// # Behavior
///
/// - Each coordinate is clamped into the image bounds first
/// - If the clamped rectangle is empty (`right <= left` or `bottom <= top`),
///   the original image is returned unchanged
/// - The full rectangle `(0, 0, width, height)` returns a copy of the input
pub fn crop(image: &Raster, left: i64, top: i64, right: i64, bottom: i64) -> Raster {
    let (w, h) = (image.width as i64, image.height as i64);
    let left = left.clamp(0, w);
    let top = top.clamp(0, h);
    let right = right.clamp(0, w);
    let bottom = bottom.clamp(0, h);

    if right <= left || bottom <= top {
        return image.clone();
    }

    // Fast path: full crop returns a clone
    if left == 0 && top == 0 && right == w && bottom == h {
        return image.clone();
    }

    let out_width = (right - left) as u32;
    let out_height = (bottom - top) as u32;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in top as u32..bottom as u32 {
        let start = image.index(left as u32, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Raster {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            let v = ((y * width + x) % 256) as u8;
            [v, v, v]
        })
    }

    #[test]
    fn test_identity_crop() {
        let img = test_image(100, 80);
        assert_eq!(crop(&img, 0, 0, 100, 80), img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop(&img, 2, 2, 8, 8);

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // Value at (2, 2) = 2 * 10 + 2 = 22
        assert_eq!(result.pixel(0, 0)[0], 22);
        // Value at (7, 7) = 77
        assert_eq!(result.pixel(5, 5)[0], 77);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = crop(&img, 8, 8, 50, 50);
        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
        assert_eq!(result.pixel(0, 0)[0], 88);
    }

    #[test]
    fn test_crop_handles_negative_coords() {
        let img = test_image(100, 100);
        let result = crop(&img, -10, -10, 50, 50);
        assert_eq!(result.width, 50);
        assert_eq!(result.height, 50);
        assert_eq!(result.pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_degenerate_crop_returns_original() {
        let img = test_image(20, 20);
        assert_eq!(crop(&img, 10, 0, 10, 20), img);
        assert_eq!(crop(&img, 15, 5, 5, 15), img);
        assert_eq!(crop(&img, 0, 20, 20, 30), img);
    }

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=64, 1u32..=64)
    }

    fn rect_strategy() -> impl Strategy<Value = (i64, i64, i64, i64)> {
        (-20i64..80, -20i64..80, -20i64..80, -20i64..80)
    }

    proptest! {
        /// Property: Output dimensions never exceed input dimensions.
        #[test]
        fn prop_output_bounded_by_input(
            (width, height) in dimensions_strategy(),
            (left, top, right, bottom) in rect_strategy(),
        ) {
            let img = test_image(width, height);
            let result = crop(&img, left, top, right, bottom);

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
        }

        /// Property: Pixel data length matches dimensions.
        #[test]
        fn prop_pixel_data_matches_dimensions(
            (width, height) in dimensions_strategy(),
            (left, top, right, bottom) in rect_strategy(),
        ) {
            let img = test_image(width, height);
            let result = crop(&img, left, top, right, bottom);
            prop_assert!(result.validate().is_ok());
        }
    }
}
