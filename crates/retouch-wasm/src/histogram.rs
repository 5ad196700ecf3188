//! Histogram computation WASM bindings.

use crate::types::JsRaster;
use retouch_core::histogram::compute_histogram as compute_histogram_core;
use wasm_bindgen::prelude::*;

/// Histogram result accessible from JavaScript.
///
/// Contains 256-bin histograms for red, green, blue and luma, plus clipping
/// flags for the color channels.
#[wasm_bindgen]
pub struct JsHistogram {
    red: Vec<u32>,
    green: Vec<u32>,
    blue: Vec<u32>,
    luma: Vec<u32>,
    max_value: u32,
    has_highlight_clipping: bool,
    has_shadow_clipping: bool,
}

#[wasm_bindgen]
impl JsHistogram {
    pub fn red(&self) -> Vec<u32> {
        self.red.clone()
    }

    pub fn green(&self) -> Vec<u32> {
        self.green.clone()
    }

    pub fn blue(&self) -> Vec<u32> {
        self.blue.clone()
    }

    pub fn luma(&self) -> Vec<u32> {
        self.luma.clone()
    }

    /// Largest bin across the color channels, for normalizing display.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Any color channel has samples at 255.
    #[wasm_bindgen(getter)]
    pub fn has_highlight_clipping(&self) -> bool {
        self.has_highlight_clipping
    }

    /// Any color channel has samples at 0.
    #[wasm_bindgen(getter)]
    pub fn has_shadow_clipping(&self) -> bool {
        self.has_shadow_clipping
    }
}

/// Compute histograms for an image.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(image);
/// const redBins = hist.red();   // Uint32Array[256]
/// const max = hist.max_value;
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(image: &JsRaster) -> JsHistogram {
    let hist = compute_histogram_core(&image.to_raster());
    let channels = [&hist.red, &hist.green, &hist.blue];

    JsHistogram {
        red: hist.red.to_vec(),
        green: hist.green.to_vec(),
        blue: hist.blue.to_vec(),
        luma: hist.luma.to_vec(),
        max_value: hist.max_value(),
        has_highlight_clipping: channels.iter().any(|bins| bins[255] > 0),
        has_shadow_clipping: channels.iter().any(|bins| bins[0] > 0),
    }
}
