//! Edit session: the state machine a UI drives.
//!
//! ```text
//! Empty --load--> Loaded --apply_*--> Edited --undo/redo--> Edited
//!   ^               ^                    |
//!   |               +------reset---------+
//!   +-- (load from any state discards history)
//! ```
//!
//! The session keeps the pristine original, a *base* image (the original with
//! every committed geometric edit applied) and the displayed result. Tone
//! adjustments and filters are always recomputed from the base, so changing a
//! slider never compounds earlier slider changes. Every committed edit pushes
//! a snapshot of the displayed image (and the base it came from) into a
//! bounded history.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::decode::{decode_image, ImageInfo};
use crate::effects::compare_split;
use crate::encode::{encode_image, ExportFormat};
use crate::filter::{FilterId, FilterSelection};
use crate::history::HistoryStore;
use crate::pipeline::FilterPipeline;
use crate::raster::Raster;
use crate::transform::{percentage_target, resize_target, GeometryOp};
use crate::{AdjustmentState, EditError};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image loaded.
    Empty,
    /// Image loaded, nothing committed since load or reset.
    Loaded,
    /// At least one edit committed.
    Edited,
}

/// One history entry.
#[derive(Debug, Clone)]
struct Snapshot {
    processed: Raster,
    base: Arc<Raster>,
}

/// Image loaded into a session.
#[derive(Debug)]
struct Loaded {
    original: Arc<Raster>,
    base: Arc<Raster>,
    processed: Raster,
}

/// An interactive editing session over one image at a time.
#[derive(Debug)]
pub struct EditSession {
    config: EditorConfig,
    pipeline: FilterPipeline,
    image: Option<Loaded>,
    adjustments: AdjustmentState,
    filter: FilterSelection,
    history: HistoryStore<Snapshot>,
    state: SessionState,
    status: String,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            pipeline: FilterPipeline::new(&config),
            history: HistoryStore::new(config.history_depth),
            config,
            image: None,
            adjustments: AdjustmentState::default(),
            filter: FilterSelection::default(),
            state: SessionState::Empty,
            status: "No image loaded".to_string(),
        }
    }

    /// Start editing `image`, discarding any previous image and history.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidImage`] if the raster is malformed; the
    /// session is left as it was.
    pub fn load(&mut self, image: Raster) -> Result<String, EditError> {
        image.validate()?;
        info!(width = image.width, height = image.height, "image loaded");

        let original = Arc::new(image);
        self.image = Some(Loaded {
            base: Arc::clone(&original),
            processed: (*original).clone(),
            original,
        });
        self.adjustments = AdjustmentState::default();
        self.filter = FilterSelection::default();
        self.seed_history();
        self.state = SessionState::Loaded;

        let (w, h) = self.dimensions().unwrap_or_default();
        Ok(self.set_status(format!("Loaded: {w}x{h} image")))
    }

    /// Decode `bytes` and [`load`](Self::load) the result.
    ///
    /// Decode failures leave the session untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<String, EditError> {
        let image = decode_image(bytes).map_err(|e| {
            warn!(error = %e, "failed to decode image");
            e
        })?;
        self.load(image)
    }

    /// Replace the tone/color adjustments and commit the result.
    pub fn apply_adjustments(&mut self, adjustments: AdjustmentState) -> Result<String, EditError> {
        let adjustments = adjustments.clamped();
        let processed = self.render(adjustments, self.filter)?;
        self.adjustments = adjustments;
        self.commit(processed);
        Ok(self.set_status("Adjustments applied".to_string()))
    }

    /// Replace the selected filter and commit the result.
    pub fn apply_filter(&mut self, selection: FilterSelection) -> Result<String, EditError> {
        let selection = selection.clamped();
        let processed = self.render(self.adjustments, selection)?;
        self.filter = selection;
        self.commit(processed);

        let status = if selection.id == FilterId::None {
            "Filters reset".to_string()
        } else if selection.id.uses_intensity() {
            format!(
                "Applied filter: {} (intensity {:.1})",
                selection.id, selection.intensity
            )
        } else {
            format!("Applied filter: {}", selection.id)
        };
        Ok(self.set_status(status))
    }

    /// Apply a geometric edit to the base image and re-render.
    ///
    /// Degenerate requests (empty crop, non-positive size or percentage, or a
    /// resize that would collapse a side to zero) are rejected with a status
    /// message and nothing is committed.
    pub fn apply_geometry(&mut self, op: GeometryOp) -> Result<String, EditError> {
        let loaded = self.image.as_ref().ok_or(EditError::NoImage)?;

        if let Some(reason) = reject_reason(&op, &loaded.base) {
            warn!(?op, reason, "geometry request ignored");
            return Ok(self.set_status(reason.to_string()));
        }

        let base = Arc::new(op.apply(&loaded.base, self.config.rotation_filter));
        let processed = self.pipeline.apply(&base, self.adjustments, self.filter)?;
        let status = geometry_status(&op, &base);

        if let Some(loaded) = self.image.as_mut() {
            loaded.base = base;
        }
        self.commit(processed);
        Ok(self.set_status(status))
    }

    /// Run a named preset's filters in order on the adjusted base and commit
    /// the result as one history entry.
    ///
    /// The preset output is not remembered as a filter selection; the next
    /// adjustment or filter change re-renders from the base.
    pub fn apply_preset(&mut self, name: &str) -> Result<String, EditError> {
        let preset = self
            .config
            .preset(name)
            .cloned()
            .ok_or_else(|| EditError::UnknownPreset(name.to_string()))?;
        let loaded = self.image.as_ref().ok_or(EditError::NoImage)?;
        loaded.base.validate()?;

        let adjusted = self.pipeline.apply_adjustments(&loaded.base, self.adjustments);
        let processed = self.pipeline.apply_filters(&adjusted, &preset.filters);
        self.filter = FilterSelection::default();
        self.commit(processed);
        Ok(self.set_status(format!("Applied preset: {}", preset.name)))
    }

    /// Render the given parameters without committing anything.
    ///
    /// Returns `Ok(None)` when real-time preview is switched off, unless
    /// `force` is set.
    pub fn preview(
        &self,
        adjustments: AdjustmentState,
        selection: FilterSelection,
        force: bool,
    ) -> Result<Option<Raster>, EditError> {
        if !self.config.real_time_preview && !force {
            return Ok(None);
        }
        self.render(adjustments, selection).map(Some)
    }

    /// Turn real-time preview on or off.
    pub fn set_real_time_preview(&mut self, enabled: bool) {
        self.config.real_time_preview = enabled;
    }

    pub fn real_time_preview(&self) -> bool {
        self.config.real_time_preview
    }

    /// Step back one history entry. A no-op with a status message when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> String {
        let restored = self.history.undo().cloned();
        match restored {
            Some(snapshot) => {
                self.restore(snapshot);
                self.set_status("Undo: Reverted to previous state".to_string())
            }
            None => {
                warn!("nothing to undo");
                self.set_status("Nothing to undo".to_string())
            }
        }
    }

    /// Step forward one history entry. A no-op with a status message when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> String {
        let restored = self.history.redo().cloned();
        match restored {
            Some(snapshot) => {
                self.restore(snapshot);
                self.set_status("Redo: Applied next state".to_string())
            }
            None => {
                warn!("nothing to redo");
                self.set_status("Nothing to redo".to_string())
            }
        }
    }

    /// Return to the pristine original: clears adjustments, filter, geometry
    /// and history. A no-op when nothing is loaded.
    pub fn reset(&mut self) -> String {
        let Some(loaded) = self.image.as_mut() else {
            return self.set_status("No image loaded".to_string());
        };
        loaded.base = Arc::clone(&loaded.original);
        loaded.processed = (*loaded.original).clone();
        self.adjustments = AdjustmentState::default();
        self.filter = FilterSelection::default();
        self.seed_history();
        self.state = SessionState::Loaded;
        info!("session reset to original");
        self.set_status("Image reset to original".to_string())
    }

    /// Encode the displayed image.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, EditError> {
        let loaded = self.image.as_ref().ok_or(EditError::NoImage)?;
        Ok(encode_image(&loaded.processed, format)?)
    }

    /// Before/after split of the original and the displayed image.
    pub fn compare_view(&self) -> Option<Raster> {
        self.image
            .as_ref()
            .map(|l| compare_split(&l.original, &l.processed))
    }

    /// Dimensions and format summary of the displayed image.
    pub fn info(&self) -> Option<ImageInfo> {
        self.image.as_ref().map(|l| ImageInfo {
            width: l.processed.width,
            height: l.processed.height,
            channels: l.processed.channels() as u8,
            format: None,
            orientation: Default::default(),
            byte_size: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The displayed image.
    pub fn processed(&self) -> Option<&Raster> {
        self.image.as_ref().map(|l| &l.processed)
    }

    /// The image as loaded.
    pub fn original(&self) -> Option<&Raster> {
        self.image.as_ref().map(|l| l.original.as_ref())
    }

    /// The original with committed geometry applied.
    pub fn base(&self) -> Option<&Raster> {
        self.image.as_ref().map(|l| l.base.as_ref())
    }

    pub fn adjustments(&self) -> AdjustmentState {
        self.adjustments
    }

    pub fn filter(&self) -> FilterSelection {
        self.filter
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.processed().map(|p| (p.width, p.height))
    }

    fn render(
        &self,
        adjustments: AdjustmentState,
        selection: FilterSelection,
    ) -> Result<Raster, EditError> {
        let loaded = self.image.as_ref().ok_or(EditError::NoImage)?;
        self.pipeline.apply(&loaded.base, adjustments, selection)
    }

    fn commit(&mut self, processed: Raster) {
        let Some(loaded) = self.image.as_mut() else {
            return;
        };
        loaded.processed = processed;
        self.history.push(Snapshot {
            processed: loaded.processed.clone(),
            base: Arc::clone(&loaded.base),
        });
        self.state = SessionState::Edited;
    }

    fn restore(&mut self, snapshot: Snapshot) {
        if let Some(loaded) = self.image.as_mut() {
            loaded.processed = snapshot.processed;
            loaded.base = snapshot.base;
            self.state = SessionState::Edited;
        }
    }

    fn seed_history(&mut self) {
        self.history = HistoryStore::new(self.config.history_depth);
        if let Some(loaded) = self.image.as_ref() {
            self.history.push(Snapshot {
                processed: loaded.processed.clone(),
                base: Arc::clone(&loaded.base),
            });
        }
    }

    fn set_status(&mut self, status: String) -> String {
        self.status = status;
        self.status.clone()
    }
}

fn reject_reason(op: &GeometryOp, base: &Raster) -> Option<&'static str> {
    match *op {
        GeometryOp::Resize { width, height, .. } if width <= 0 || height <= 0 => {
            Some("Invalid dimensions: Width and height must be positive")
        }
        GeometryOp::Resize {
            width,
            height,
            keep_aspect,
        } => resize_target(base, width, height, keep_aspect)
            .is_none()
            .then_some("Invalid dimensions: Resulting image would be empty"),
        GeometryOp::ResizePercent { percent } if !(percent > 0.0 && percent.is_finite()) => {
            Some("Invalid percentage: Must be positive")
        }
        GeometryOp::ResizePercent { percent } => percentage_target(base, percent)
            .is_none()
            .then_some("Invalid percentage: Resulting image would be empty"),
        GeometryOp::Crop {
            left,
            top,
            right,
            bottom,
        } => {
            let (w, h) = (base.width as i64, base.height as i64);
            let empty = right.clamp(0, w) <= left.clamp(0, w) || bottom.clamp(0, h) <= top.clamp(0, h);
            empty.then_some("Invalid crop area: Selection is empty")
        }
        GeometryOp::Rotate { degrees } if !degrees.is_finite() => {
            Some("Invalid rotation angle")
        }
        _ => None,
    }
}

fn geometry_status(op: &GeometryOp, result: &Raster) -> String {
    match op {
        GeometryOp::Rotate { degrees } => format!("Image rotated by {degrees}°"),
        GeometryOp::FlipHorizontal => "Image flipped horizontally".to_string(),
        GeometryOp::FlipVertical => "Image flipped vertically".to_string(),
        GeometryOp::Crop { .. } => {
            format!("Image cropped to {}x{} pixels", result.width, result.height)
        }
        GeometryOp::Resize { .. } | GeometryOp::ResizePercent { .. } => {
            format!("Image resized to {}x{} pixels", result.width, result.height)
        }
    }
}
