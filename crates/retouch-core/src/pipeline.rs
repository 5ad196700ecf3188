//! The single entry point that turns a base image plus parameters into the
//! displayed image.
//!
//! Steps run in a fixed order and each is skipped only when it is the exact
//! identity:
//! 1. brightness + contrast
//! 2. saturation
//! 3. hue
//! 4. the selected filter, parametrized by intensity

use tracing::debug;

use crate::adjustments::{
    adjust_brightness_contrast, adjust_hue_with, adjust_saturation, grayscale, invert, threshold,
    HueMode,
};
use crate::config::EditorConfig;
use crate::effects::{
    cartoonify, color_balance, histogram_equalization_with, oil_painting, pencil_sketch, sepia,
    vignette_with, EqualizationMode,
};
use crate::filter::{FilterId, FilterSelection};
use crate::mask::Falloff;
use crate::kernel::{
    closing, dilate, edge_detect, emboss, erode, gaussian_blur, median_filter, opening, sharpen,
    window_size,
};
use crate::raster::Raster;
use crate::{AdjustmentState, EditError};

/// Stateless renderer configured with the rendering modes from
/// [`EditorConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPipeline {
    pub hue_mode: HueMode,
    pub equalization_mode: EqualizationMode,
    pub vignette_falloff: Falloff,
}

impl FilterPipeline {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            hue_mode: config.hue_mode,
            equalization_mode: config.equalization_mode,
            vignette_falloff: config.vignette_falloff,
        }
    }

    /// Render `base` with the given adjustments and filter.
    ///
    /// Out-of-range parameters are clamped. `base` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidImage`] if `base` has zero dimensions or a
    /// buffer that does not match them.
    pub fn apply(
        &self,
        base: &Raster,
        adjustments: AdjustmentState,
        selection: FilterSelection,
    ) -> Result<Raster, EditError> {
        base.validate()?;
        let adjusted = self.apply_adjustments(base, adjustments);
        Ok(self.apply_filter(&adjusted, selection))
    }

    /// Steps 1-3 only.
    pub fn apply_adjustments(&self, image: &Raster, adjustments: AdjustmentState) -> Raster {
        let adj = adjustments.clamped();

        let mut out = if adj.brightness != 0 || adj.contrast != 1.0 {
            debug!(
                step = "brightness_contrast",
                brightness = adj.brightness,
                contrast = adj.contrast,
                "processing"
            );
            adjust_brightness_contrast(image, adj.brightness, adj.contrast)
        } else {
            image.clone()
        };

        if adj.saturation != 1.0 {
            debug!(step = "saturation", factor = adj.saturation, "processing");
            out = adjust_saturation(&out, adj.saturation);
        }

        if adj.hue != 0 {
            debug!(step = "hue", shift = adj.hue, mode = ?self.hue_mode, "processing");
            out = adjust_hue_with(&out, adj.hue, self.hue_mode);
        }

        out
    }

    /// Step 4 only.
    pub fn apply_filter(&self, image: &Raster, selection: FilterSelection) -> Raster {
        let FilterSelection { id, intensity } = selection.clamped();
        if id == FilterId::None {
            return image.clone();
        }
        debug!(step = "filter", filter = %id, intensity, "processing");

        match id {
            FilterId::None => image.clone(),
            FilterId::Grayscale => grayscale(image),
            FilterId::Sepia => sepia(image),
            FilterId::Invert => invert(image),
            FilterId::Brightness => {
                adjust_brightness_contrast(image, (50.0 * intensity).round() as i32, 1.0)
            }
            FilterId::Contrast => adjust_brightness_contrast(image, 0, 1.0 + intensity),
            FilterId::Saturation => adjust_saturation(image, 1.0 + intensity),
            FilterId::GaussianBlur => gaussian_blur(image, intensity * 5.0),
            FilterId::MedianBlur => median_filter(image, window_size(intensity)),
            FilterId::Sharpen => sharpen(image, intensity),
            FilterId::EdgeDetection => edge_detect(image),
            FilterId::Emboss => emboss(image),
            FilterId::Threshold => threshold(image, (128.0 * intensity).min(255.0) as u8),
            FilterId::HistogramEq => {
                histogram_equalization_with(image, intensity, self.equalization_mode)
            }
            FilterId::ColorBalance => color_balance(image, intensity),
            FilterId::Vignette => vignette_with(image, intensity, self.vignette_falloff),
            FilterId::Cartoonify => cartoonify(image),
            FilterId::OilPainting => oil_painting(image, intensity),
            FilterId::PencilSketch => pencil_sketch(image, intensity),
            FilterId::Erosion => erode(image, window_size(intensity)),
            FilterId::Dilation => dilate(image, window_size(intensity)),
            FilterId::Opening => opening(image, window_size(intensity)),
            FilterId::Closing => closing(image, window_size(intensity)),
        }
    }

    /// Apply several filters in order, each on the previous result.
    pub fn apply_filters(&self, image: &Raster, selections: &[FilterSelection]) -> Raster {
        selections
            .iter()
            .fold(image.clone(), |acc, &sel| self.apply_filter(&acc, sel))
    }
}
