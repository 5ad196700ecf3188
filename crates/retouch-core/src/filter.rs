//! The closed set of named filters and the user's current choice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted filter intensity.
pub const MIN_INTENSITY: f32 = 0.1;
/// Highest accepted filter intensity.
pub const MAX_INTENSITY: f32 = 2.0;

/// Error returned when parsing an unknown filter id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown filter: {0}")]
pub struct ParseFilterError(pub String);

/// Identifier of a named filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterId {
    /// No filter; the pipeline stops after the adjustments.
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Brightness,
    Contrast,
    Saturation,
    GaussianBlur,
    MedianBlur,
    Sharpen,
    EdgeDetection,
    Emboss,
    Threshold,
    #[serde(rename = "histogram_eq")]
    HistogramEq,
    ColorBalance,
    Vignette,
    Cartoonify,
    OilPainting,
    PencilSketch,
    Erosion,
    Dilation,
    Opening,
    Closing,
}

impl FilterId {
    /// Every filter id, in menu order.
    pub const ALL: [FilterId; 23] = [
        FilterId::None,
        FilterId::Grayscale,
        FilterId::Sepia,
        FilterId::Invert,
        FilterId::Brightness,
        FilterId::Contrast,
        FilterId::Saturation,
        FilterId::GaussianBlur,
        FilterId::MedianBlur,
        FilterId::Sharpen,
        FilterId::EdgeDetection,
        FilterId::Emboss,
        FilterId::Threshold,
        FilterId::HistogramEq,
        FilterId::ColorBalance,
        FilterId::Vignette,
        FilterId::Cartoonify,
        FilterId::OilPainting,
        FilterId::PencilSketch,
        FilterId::Erosion,
        FilterId::Dilation,
        FilterId::Opening,
        FilterId::Closing,
    ];

    /// The snake_case name used in configs and status text.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterId::None => "none",
            FilterId::Grayscale => "grayscale",
            FilterId::Sepia => "sepia",
            FilterId::Invert => "invert",
            FilterId::Brightness => "brightness",
            FilterId::Contrast => "contrast",
            FilterId::Saturation => "saturation",
            FilterId::GaussianBlur => "gaussian_blur",
            FilterId::MedianBlur => "median_blur",
            FilterId::Sharpen => "sharpen",
            FilterId::EdgeDetection => "edge_detection",
            FilterId::Emboss => "emboss",
            FilterId::Threshold => "threshold",
            FilterId::HistogramEq => "histogram_eq",
            FilterId::ColorBalance => "color_balance",
            FilterId::Vignette => "vignette",
            FilterId::Cartoonify => "cartoonify",
            FilterId::OilPainting => "oil_painting",
            FilterId::PencilSketch => "pencil_sketch",
            FilterId::Erosion => "erosion",
            FilterId::Dilation => "dilation",
            FilterId::Opening => "opening",
            FilterId::Closing => "closing",
        }
    }

    /// Whether the filter's output depends on intensity.
    pub fn uses_intensity(&self) -> bool {
        !matches!(
            self,
            FilterId::None
                | FilterId::Grayscale
                | FilterId::Sepia
                | FilterId::Invert
                | FilterId::EdgeDetection
                | FilterId::Emboss
                | FilterId::Cartoonify
        )
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterId {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        FilterId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// A filter choice plus its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub id: FilterId,
    /// Strength in [`MIN_INTENSITY`, `MAX_INTENSITY`]
    pub intensity: f32,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            id: FilterId::None,
            intensity: 1.0,
        }
    }
}

impl FilterSelection {
    /// Create a selection with the intensity clamped into range.
    pub fn new(id: FilterId, intensity: f32) -> Self {
        Self {
            id,
            intensity: clamp_intensity(intensity),
        }
    }

    /// Copy of this selection with the intensity clamped into range.
    pub fn clamped(self) -> Self {
        Self::new(self.id, self.intensity)
    }

    pub fn is_none(&self) -> bool {
        self.id == FilterId::None
    }
}

/// Clamp an intensity into range; NaN becomes 1.0.
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        1.0
    } else {
        intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_name() {
        for id in FilterId::ALL {
            assert_eq!(id.as_str().parse::<FilterId>().unwrap(), id);
            assert_eq!(id.to_string(), id.as_str());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Pencil_Sketch".parse::<FilterId>().unwrap(), FilterId::PencilSketch);
        assert_eq!(" sepia ".parse::<FilterId>().unwrap(), FilterId::Sepia);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "watercolor".parse::<FilterId>().unwrap_err();
        assert_eq!(err, ParseFilterError("watercolor".to_string()));
        assert_eq!(err.to_string(), "Unknown filter: watercolor");
    }

    #[test]
    fn test_serde_names_match_display() {
        for id in FilterId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_selection_clamps_intensity() {
        assert_eq!(FilterSelection::new(FilterId::Sepia, 5.0).intensity, MAX_INTENSITY);
        assert_eq!(FilterSelection::new(FilterId::Sepia, 0.0).intensity, MIN_INTENSITY);
        assert_eq!(FilterSelection::new(FilterId::Sepia, f32::NAN).intensity, 1.0);
    }

    #[test]
    fn test_default_selection_is_none() {
        let sel = FilterSelection::default();
        assert!(sel.is_none());
        assert_eq!(sel.intensity, 1.0);
    }

    #[test]
    fn test_intensity_dependence() {
        assert!(FilterId::Vignette.uses_intensity());
        assert!(FilterId::Sharpen.uses_intensity());
        assert!(!FilterId::Sepia.uses_intensity());
    }
}
