//! WASM-compatible wrapper types for image data.
//!
//! JavaScript sees images as a width, a height and a flat RGB byte buffer.
//! These wrappers convert between that shape and the core [`Raster`].

use retouch_core::Raster;
use wasm_bindgen::prelude::*;

/// An RGB image owned by WASM memory.
///
/// # Memory Management
///
/// `pixels()` copies the buffer into a JavaScript `Uint8Array`. Keep images
/// on the WASM side between operations and only extract pixels for display.
/// `free()` releases the memory early; otherwise the finalizer does it.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// The buffer is checked against the dimensions when the image is first
    /// handed to an editing operation.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Copy into a core raster without validating the buffer length.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Map a core error into the string form JavaScript callers receive.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
