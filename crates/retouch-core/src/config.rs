//! Editor configuration loaded from JSON.
//!
//! Every field has a default, so a partial (or empty) JSON object is a valid
//! config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjustments::HueMode;
use crate::effects::EqualizationMode;
use crate::filter::{FilterId, FilterSelection};
use crate::mask::Falloff;
use crate::transform::InterpolationFilter;

/// Default number of history snapshots kept.
pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// Errors that can occur while loading a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A named sequence of filters applied one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub name: String,
    pub filters: Vec<FilterSelection>,
}

impl FilterPreset {
    pub fn new(name: impl Into<String>, filters: &[(FilterId, f32)]) -> Self {
        Self {
            name: name.into(),
            filters: filters
                .iter()
                .map(|&(id, intensity)| FilterSelection::new(id, intensity))
                .collect(),
        }
    }
}

/// Settings for an edit session and its pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots (at least 1).
    pub history_depth: usize,
    pub hue_mode: HueMode,
    pub equalization_mode: EqualizationMode,
    /// Edge shape of the `vignette` filter.
    pub vignette_falloff: Falloff,
    /// Filter used for non-quarter-turn rotations.
    pub rotation_filter: InterpolationFilter,
    /// Re-run the pipeline on every parameter change.
    pub real_time_preview: bool,
    pub presets: Vec<FilterPreset>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            hue_mode: HueMode::default(),
            equalization_mode: EqualizationMode::default(),
            vignette_falloff: Falloff::default(),
            rotation_filter: InterpolationFilter::default(),
            real_time_preview: true,
            presets: default_presets(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "history_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(preset) = self.presets.iter().find(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "presets",
                reason: format!("preset with {} filters has an empty name", preset.filters.len()),
            });
        }
        Ok(())
    }

    /// Look up a preset by name, ignoring case.
    pub fn preset(&self, name: &str) -> Option<&FilterPreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// The built-in presets.
pub fn default_presets() -> Vec<FilterPreset> {
    vec![
        FilterPreset::new("Vintage", &[(FilterId::Sepia, 0.8), (FilterId::Vignette, 1.2)]),
        FilterPreset::new(
            "Dramatic",
            &[(FilterId::Contrast, 1.5), (FilterId::Brightness, 0.8)],
        ),
        FilterPreset::new("Sketch", &[(FilterId::PencilSketch, 1.0)]),
        FilterPreset::new(
            "Vibrant",
            &[(FilterId::Saturation, 1.5), (FilterId::Brightness, 1.2)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_depth, 10);
        assert!(config.real_time_preview);
        assert_eq!(config.presets.len(), 4);
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_json(
            r#"{"history_depth": 3, "hue_mode": "rotate", "equalization_mode": "contrast_boost"}"#,
        )
        .unwrap();
        assert_eq!(config.history_depth, 3);
        assert_eq!(config.hue_mode, HueMode::Rotate);
        assert_eq!(config.equalization_mode, EqualizationMode::ContrastBoost);
        assert_eq!(config.rotation_filter, InterpolationFilter::Bicubic);
        assert_eq!(config.vignette_falloff, Falloff::Linear);
    }

    #[test]
    fn test_vignette_falloff_from_json() {
        let config = EditorConfig::from_json(r#"{"vignette_falloff": "smooth"}"#).unwrap();
        assert_eq!(config.vignette_falloff, Falloff::Smooth);
    }

    #[test]
    fn test_custom_presets() {
        let config = EditorConfig::from_json(
            r#"{"presets": [{"name": "Noir", "filters": [{"id": "grayscale"}, {"id": "contrast", "intensity": 1.2}]}]}"#,
        )
        .unwrap();
        let noir = config.preset("noir").unwrap();
        assert_eq!(noir.filters.len(), 2);
        assert_eq!(noir.filters[0].id, FilterId::Grayscale);
        assert_eq!(noir.filters[0].intensity, 1.0);
        assert_eq!(noir.filters[1].intensity, 1.2);
    }

    #[test]
    fn test_zero_history_rejected() {
        let err = EditorConfig::from_json(r#"{"history_depth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "history_depth", .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = EditorConfig::from_json("{ history_depth: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let err = EditorConfig::from_json(
            r#"{"presets": [{"name": "X", "filters": [{"id": "watercolor"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
