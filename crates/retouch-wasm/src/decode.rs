//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG, PNG, BMP, GIF, TIFF or WebP bytes
//! - [`image_info`] - Read dimensions and format without decoding pixels
//! - [`image_summary`] - One-line description for status display
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, image_summary } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! console.log(image_summary(bytes));
//! const image = decode_image(bytes);
//! ```

use crate::types::{js_error, JsRaster};
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// EXIF orientation is applied, and the result is always 8-bit RGB.
///
/// # Errors
///
/// Returns an error if the container is not recognized or the data is
/// corrupted or truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(js_error)
}

/// Read image metadata as a plain object.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const info = image_info(bytes);
/// console.log(info.width, info.height, info.format, info.channels);
/// ```
#[wasm_bindgen]
pub fn image_info(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = decode::image_info(bytes).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&info).map_err(js_error)
}

/// One-line description such as `"640x480 JPEG (3 channels, 52.1 KB)"`.
#[wasm_bindgen]
pub fn image_summary(bytes: &[u8]) -> Result<String, JsValue> {
    decode::image_info(bytes)
        .map(|info| info.summary())
        .map_err(js_error)
}
