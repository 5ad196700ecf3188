//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing engine to JavaScript and
//! TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGB image data
//! - `adjustments` - Adjustment parameters and the stateless filter pipeline
//! - `session` - Interactive edit session with undo/redo
//! - `decode` - Image decoding and metadata
//! - `encode` - Image encoding for export
//! - `histogram` - RGB and luma histograms
//! - `transform` - Rotation, flips, crop and resize
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! console.log(session.load_bytes(new Uint8Array(await file.arrayBuffer())));
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod histogram;
mod session;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{apply_edit, filter_names, filter_uses_intensity, Adjustments};
pub use decode::{decode_image, image_info, image_summary};
pub use encode::{encode_image, encode_jpeg};
pub use histogram::{compute_histogram, JsHistogram};
pub use session::JsEditSession;
pub use transform::{crop, flip_horizontal, flip_vertical, resize, resize_by_percentage, rotate};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
