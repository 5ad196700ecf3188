//! Retouch Core - image adjustment and filter library
//!
//! This crate provides the editing core for Retouch: tone and color
//! adjustments, neighborhood and stylized filters, geometric transforms, the
//! filter pipeline, bounded undo/redo history and the edit session that ties
//! them together.

pub mod adjustments;
pub mod batch;
pub mod config;
pub mod decode;
pub mod effects;
pub mod encode;
pub mod filter;
pub mod histogram;
pub mod history;
pub mod kernel;
pub mod luminance;
pub mod lut;
pub mod mask;
pub mod pipeline;
pub mod raster;
pub mod session;
pub mod transform;

use thiserror::Error;

pub use config::{EditorConfig, FilterPreset};
pub use filter::{FilterId, FilterSelection};
pub use history::HistoryStore;
pub use pipeline::FilterPipeline;
pub use raster::{Raster, RasterError};
pub use session::{EditSession, SessionState};
pub use transform::GeometryOp;

/// Range of [`AdjustmentState::brightness`].
pub const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);
/// Range of [`AdjustmentState::contrast`].
pub const CONTRAST_RANGE: (f32, f32) = (0.1, 3.0);
/// Range of [`AdjustmentState::saturation`].
pub const SATURATION_RANGE: (f32, f32) = (0.0, 2.0);
/// Range of [`AdjustmentState::hue`].
pub const HUE_RANGE: (i32, i32) = (0, 360);

/// Global tone and color adjustments
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentState {
    /// Brightness (-100 to 100); 0 is neutral
    pub brightness: i32,
    /// Contrast multiplier (0.1 to 3.0); 1.0 is neutral
    pub contrast: f32,
    /// Saturation multiplier (0.0 to 2.0); 1.0 is neutral
    pub saturation: f32,
    /// Hue shift in degrees (0 to 360); 0 is neutral
    pub hue: i32,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 1.0,
            saturation: 1.0,
            hue: 0,
        }
    }
}

impl AdjustmentState {
    /// Create a new AdjustmentState with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Copy with every field clamped into its range. NaN falls back to the
    /// neutral value.
    pub fn clamped(self) -> Self {
        let clamp_f = |v: f32, (lo, hi): (f32, f32), neutral: f32| {
            if v.is_nan() {
                neutral
            } else {
                v.clamp(lo, hi)
            }
        };
        Self {
            brightness: self.brightness.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1),
            contrast: clamp_f(self.contrast, CONTRAST_RANGE, 1.0),
            saturation: clamp_f(self.saturation, SATURATION_RANGE, 1.0),
            hue: self.hue.clamp(HUE_RANGE.0, HUE_RANGE.1),
        }
    }
}

/// Errors surfaced by the pipeline and the edit session.
///
/// Out-of-range parameters are never errors; they are clamped or ignored.
#[derive(Debug, Error)]
pub enum EditError {
    /// An operation needs an image but none is loaded.
    #[error("No image loaded")]
    NoImage,

    /// The image buffer does not match its dimensions.
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] RasterError),

    /// The named preset does not exist.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Decode(#[from] decode::DecodeError),

    #[error(transparent)]
    Encode(#[from] encode::EncodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_state_default() {
        let adj = AdjustmentState::new();
        assert!(adj.is_default());
        assert_eq!(adj.brightness, 0);
        assert_eq!(adj.contrast, 1.0);
        assert_eq!(adj.saturation, 1.0);
        assert_eq!(adj.hue, 0);
    }

    #[test]
    fn test_adjustment_state_not_default() {
        let mut adj = AdjustmentState::new();
        adj.hue = 90;
        assert!(!adj.is_default());
    }

    #[test]
    fn test_clamped() {
        let adj = AdjustmentState {
            brightness: -300,
            contrast: 0.0,
            saturation: f32::NAN,
            hue: 400,
        }
        .clamped();
        assert_eq!(adj.brightness, -100);
        assert_eq!(adj.contrast, 0.1);
        assert_eq!(adj.saturation, 1.0);
        assert_eq!(adj.hue, 360);
    }

    #[test]
    fn test_partial_json() {
        let adj: AdjustmentState = serde_json::from_str(r#"{"brightness": 25}"#).unwrap();
        assert_eq!(adj.brightness, 25);
        assert_eq!(adj.contrast, 1.0);
    }

    #[test]
    fn test_edit_error_display() {
        assert_eq!(EditError::NoImage.to_string(), "No image loaded");
        let err = EditError::from(RasterError::InvalidDimensions {
            width: 0,
            height: 3,
        });
        assert!(err.to_string().starts_with("Invalid image:"));
    }
}
