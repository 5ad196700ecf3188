//! Edit session WASM bindings.
//!
//! Wraps the core edit session so a browser front end can drive the whole
//! load / adjust / filter / undo / export loop while the images stay in WASM
//! memory. Every mutating call returns the new status line.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession, Adjustments } from '@retouch/wasm';
//!
//! const session = new JsEditSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! const adj = new Adjustments();
//! adj.contrast = 1.3;
//! session.apply_adjustments(adj);
//! session.apply_filter('vignette', 1.2);
//! session.undo();
//!
//! const bytes = session.export('jpg', 90);
//! ```

use crate::adjustments::{parse_selection, Adjustments};
use crate::types::{js_error, JsRaster};
use retouch_core::encode::ExportFormat;
use retouch_core::{EditSession, EditorConfig, GeometryOp, SessionState};
use wasm_bindgen::prelude::*;

/// An editing session over one image at a time.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditSession::new(EditorConfig::default()),
        }
    }

    /// Create a session from a JSON configuration document.
    ///
    /// Missing keys take their defaults.
    pub fn with_config(json: &str) -> Result<JsEditSession, JsValue> {
        let config = EditorConfig::from_json(json).map_err(js_error)?;
        Ok(Self {
            inner: EditSession::new(config),
        })
    }

    /// Load an already-decoded image, replacing any current one.
    pub fn load(&mut self, image: &JsRaster) -> Result<String, JsValue> {
        self.inner.load(image.to_raster()).map_err(js_error)
    }

    /// Decode and load encoded image bytes.
    ///
    /// On failure the current image and history are kept.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<String, JsValue> {
        self.inner.load_bytes(bytes).map_err(js_error)
    }

    pub fn apply_adjustments(&mut self, adjustments: &Adjustments) -> Result<String, JsValue> {
        self.inner
            .apply_adjustments(adjustments.inner())
            .map_err(js_error)
    }

    /// Select a filter by name (`"none"` clears it).
    pub fn apply_filter(&mut self, filter: &str, intensity: f32) -> Result<String, JsValue> {
        let selection = parse_selection(filter, intensity)?;
        self.inner.apply_filter(selection).map_err(js_error)
    }

    /// Apply a named preset from the session configuration.
    pub fn apply_preset(&mut self, name: &str) -> Result<String, JsValue> {
        self.inner.apply_preset(name).map_err(js_error)
    }

    /// Rotate clockwise by `degrees`.
    pub fn rotate(&mut self, degrees: f64) -> Result<String, JsValue> {
        self.geometry(GeometryOp::Rotate { degrees })
    }

    pub fn flip_horizontal(&mut self) -> Result<String, JsValue> {
        self.geometry(GeometryOp::FlipHorizontal)
    }

    pub fn flip_vertical(&mut self) -> Result<String, JsValue> {
        self.geometry(GeometryOp::FlipVertical)
    }

    /// Crop to `[left, right) x [top, bottom)` in pixels.
    pub fn crop(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> Result<String, JsValue> {
        self.geometry(GeometryOp::Crop {
            left: left as i64,
            top: top as i64,
            right: right as i64,
            bottom: bottom as i64,
        })
    }

    pub fn resize(&mut self, width: i32, height: i32, keep_aspect: bool) -> Result<String, JsValue> {
        self.geometry(GeometryOp::Resize {
            width: width as i64,
            height: height as i64,
            keep_aspect,
        })
    }

    pub fn resize_percent(&mut self, percent: f64) -> Result<String, JsValue> {
        self.geometry(GeometryOp::ResizePercent { percent })
    }

    /// Render the given parameters without committing them.
    ///
    /// Returns `undefined` while real-time preview is off, unless `force`
    /// is set.
    pub fn preview(
        &self,
        adjustments: &Adjustments,
        filter: &str,
        intensity: f32,
        force: bool,
    ) -> Result<Option<JsRaster>, JsValue> {
        let selection = parse_selection(filter, intensity)?;
        let preview = self
            .inner
            .preview(adjustments.inner(), selection, force)
            .map_err(js_error)?;
        Ok(preview.map(JsRaster::from_raster))
    }

    #[wasm_bindgen(getter)]
    pub fn real_time_preview(&self) -> bool {
        self.inner.real_time_preview()
    }

    #[wasm_bindgen(setter)]
    pub fn set_real_time_preview(&mut self, enabled: bool) {
        self.inner.set_real_time_preview(enabled);
    }

    pub fn undo(&mut self) -> String {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> String {
        self.inner.redo()
    }

    /// Discard every edit and return to the loaded image.
    pub fn reset(&mut self) -> String {
        self.inner.reset()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Last status message.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    /// `"empty"`, `"loaded"` or `"edited"`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.inner.state() {
            SessionState::Empty => "empty",
            SessionState::Loaded => "loaded",
            SessionState::Edited => "edited",
        }
        .to_string()
    }

    /// The displayed image (copied), if one is loaded.
    pub fn processed(&self) -> Option<JsRaster> {
        self.inner.processed().cloned().map(JsRaster::from_raster)
    }

    /// Side-by-side comparison of the original and the displayed image.
    pub fn compare_view(&self) -> Option<JsRaster> {
        self.inner.compare_view().map(JsRaster::from_raster)
    }

    /// Encode the displayed image in the format named by `extension`.
    pub fn export(&self, extension: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
        let format = ExportFormat::from_extension(extension, quality).map_err(js_error)?;
        self.inner.export(format).map_err(js_error)
    }
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl JsEditSession {
    fn geometry(&mut self, op: GeometryOp) -> Result<String, JsValue> {
        self.inner.apply_geometry(op).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session(width: u32, height: u32) -> JsEditSession {
        let mut session = JsEditSession::new();
        let image = JsRaster::new(width, height, vec![100u8; (width * height * 3) as usize]);
        assert!(session.load(&image).is_ok());
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = JsEditSession::new();
        assert_eq!(session.state(), "empty");
        assert!(session.processed().is_none());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_load_reports_dimensions() {
        let session = loaded_session(8, 4);
        assert_eq!(session.state(), "loaded");
        assert_eq!(session.status(), "Loaded: 8x4 image");
    }

    #[test]
    fn test_filter_then_undo_redo() {
        let mut session = loaded_session(4, 4);
        let status = session.apply_filter("invert", 1.0).ok().unwrap();
        assert_eq!(status, "Applied filter: invert");
        assert_eq!(&session.processed().unwrap().pixels()[0..3], &[155, 155, 155]);

        assert_eq!(session.undo(), "Undo: Reverted to previous state");
        assert_eq!(&session.processed().unwrap().pixels()[0..3], &[100, 100, 100]);

        assert_eq!(session.redo(), "Redo: Applied next state");
        assert_eq!(&session.processed().unwrap().pixels()[0..3], &[155, 155, 155]);
    }

    #[test]
    fn test_geometry_changes_dimensions() {
        let mut session = loaded_session(10, 6);
        let status = session.rotate(90.0).ok().unwrap();
        assert_eq!(status, "Image rotated by 90°");
        let image = session.processed().unwrap();
        assert_eq!((image.width(), image.height()), (6, 10));

        session.crop(0, 0, 3, 5).ok().unwrap();
        let image = session.processed().unwrap();
        assert_eq!((image.width(), image.height()), (3, 5));
    }

    #[test]
    fn test_adjustments_and_reset() {
        let mut session = loaded_session(2, 2);
        let mut adj = Adjustments::new();
        adj.set_brightness(20);
        assert_eq!(
            session.apply_adjustments(&adj).ok().unwrap(),
            "Adjustments applied"
        );
        assert_eq!(session.state(), "edited");

        assert_eq!(session.reset(), "Image reset to original");
        assert_eq!(session.processed().unwrap().pixels(), vec![100u8; 12]);
    }

    #[test]
    fn test_preview_respects_toggle() {
        let mut session = loaded_session(2, 2);
        let adj = Adjustments::new();
        session.set_real_time_preview(false);
        assert!(session.preview(&adj, "sepia", 1.0, false).ok().unwrap().is_none());
        assert!(session.preview(&adj, "sepia", 1.0, true).ok().unwrap().is_some());
        // Preview never commits
        assert!(!session.can_undo());
    }

    #[test]
    fn test_export_png() {
        let session = loaded_session(3, 3);
        let bytes = session.export("png", 0).ok().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_with_config_history_depth() {
        let mut session = JsEditSession::with_config(r#"{"history_depth": 2}"#).ok().unwrap();
        let image = JsRaster::new(2, 2, vec![50u8; 12]);
        session.load(&image).ok().unwrap();
        for _ in 0..4 {
            session.apply_filter("invert", 1.0).ok().unwrap();
        }
        assert_eq!(session.undo(), "Undo: Reverted to previous state");
        assert_eq!(session.undo(), "Nothing to undo");
    }
}
