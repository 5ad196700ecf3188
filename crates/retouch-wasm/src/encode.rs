//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode raw RGB pixel data to JPEG bytes
//! - [`encode_image`] - Encode a [`JsRaster`] by file extension
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@retouch/wasm';
//!
//! const png = encode_image(image, 'png', 0);
//! const jpeg = encode_image(image, 'jpg', 90);
//! ```

use crate::types::{js_error, JsRaster};
use retouch_core::encode::{self, ExportFormat};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100)
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3` or either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}

/// Encode an image in the format named by `extension`.
///
/// Accepts `jpg`/`jpeg`, `png`, `bmp` and `tif`/`tiff`, ignoring case.
/// `quality` only affects JPEG output.
#[wasm_bindgen]
pub fn encode_image(image: &JsRaster, extension: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = ExportFormat::from_extension(extension, quality).map_err(js_error)?;
    encode::encode_image(&image.to_raster(), format).map_err(js_error)
}


/// Error-path tests construct `JsValue`s and only run on wasm32 targets.
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_dimensions() {
        let pixels = vec![128u8; 100];
        assert!(encode_jpeg(&pixels, 0, 100, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 50 * 50 * 3];
        assert!(encode_jpeg(&pixels, 100, 100, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_image_unknown_extension() {
        let img = JsRaster::new(2, 2, vec![0u8; 12]);
        let err = encode_image(&img, "xyz", 90).err().unwrap();
        assert!(err.as_string().unwrap().contains("xyz"));
    }
}
