//! Adjustment and filter WASM bindings.
//!
//! Exposes the adjustment parameters as a JavaScript class and runs the
//! stateless pipeline (adjustments, then one filter) over an image.

use crate::types::{js_error, JsRaster};
use retouch_core::{AdjustmentState, EditorConfig, FilterId, FilterPipeline, FilterSelection};
use wasm_bindgen::prelude::*;

/// Adjustment parameters for JavaScript.
///
/// Values outside their ranges are clamped when the adjustments are applied.
#[wasm_bindgen]
pub struct Adjustments {
    inner: AdjustmentState,
}

#[wasm_bindgen]
impl Adjustments {
    /// Create adjustments with neutral values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: AdjustmentState::new(),
        }
    }

    /// Brightness offset (-100 to 100)
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    /// Contrast multiplier (0.1 to 3.0)
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Saturation multiplier (0.0 to 2.0)
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Hue shift in degrees (0 to 360)
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> i32 {
        self.inner.hue
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: i32) {
        self.inner.hue = value;
    }

    /// Check if all adjustments are at default values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(js_error)
    }

    /// Deserialize from a plain object; missing fields take neutral values
    pub fn from_json(value: JsValue) -> Result<Adjustments, JsValue> {
        let inner: AdjustmentState = serde_wasm_bindgen::from_value(value).map_err(js_error)?;
        Ok(Self { inner })
    }
}

impl Default for Adjustments {
    fn default() -> Self {
        Self::new()
    }
}

impl Adjustments {
    pub(crate) fn inner(&self) -> AdjustmentState {
        self.inner
    }
}

/// Parse a filter name and clamp its intensity.
pub(crate) fn parse_selection(filter: &str, intensity: f32) -> Result<FilterSelection, JsValue> {
    let id: FilterId = filter.parse().map_err(js_error)?;
    Ok(FilterSelection::new(id, intensity))
}

/// Names accepted by [`apply_edit`] and `JsEditSession.apply_filter`.
#[wasm_bindgen]
pub fn filter_names() -> Vec<String> {
    FilterId::ALL.iter().map(|id| id.as_str().to_string()).collect()
}

/// Whether the named filter's output depends on intensity, so a UI can
/// disable its slider. Unknown names report `false`.
#[wasm_bindgen]
pub fn filter_uses_intensity(filter: &str) -> bool {
    filter
        .parse::<FilterId>()
        .map(|id| id.uses_intensity())
        .unwrap_or(false)
}

/// Apply adjustments and then one filter to an image.
///
/// Uses the default editor configuration. The source image is unchanged.
///
/// # Arguments
/// * `image` - The source image
/// * `adjustments` - Brightness, contrast, saturation and hue
/// * `filter` - Filter name such as `"sepia"` or `"gaussian_blur"` (`"none"` for no filter)
/// * `intensity` - Filter strength, clamped to 0.1-2.0
///
/// # Example (TypeScript)
/// ```typescript
/// const adj = new Adjustments();
/// adj.brightness = 20;
/// const result = apply_edit(sourceImage, adj, 'sepia', 0.8);
/// ```
#[wasm_bindgen]
pub fn apply_edit(
    image: &JsRaster,
    adjustments: &Adjustments,
    filter: &str,
    intensity: f32,
) -> Result<JsRaster, JsValue> {
    let selection = parse_selection(filter, intensity)?;
    let pipeline = FilterPipeline::new(&EditorConfig::default());
    pipeline
        .apply(&image.to_raster(), adjustments.inner(), selection)
        .map(JsRaster::from_raster)
        .map_err(js_error)
}
