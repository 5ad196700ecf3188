//! Apply one set of operations to many files.
//!
//! Each input is decoded, run through the pipeline, optionally resized and
//! written to `<output_dir>/<stem>_processed.<ext>`. A file that fails is
//! logged and skipped; the rest of the batch continues.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::decode::decode_file;
use crate::encode::{encode_image, ExportFormat, DEFAULT_JPEG_QUALITY};
use crate::filter::FilterSelection;
use crate::pipeline::FilterPipeline;
use crate::raster::Raster;
use crate::transform::{resize, resize_by_percentage};
use crate::{AdjustmentState, EditError};

/// Final resize step of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchResize {
    Pixels {
        width: i64,
        height: i64,
        #[serde(default = "default_keep_aspect")]
        keep_aspect: bool,
    },
    Percent(f64),
}

fn default_keep_aspect() -> bool {
    true
}

/// Operations applied to every file in a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOperations {
    pub adjustments: AdjustmentState,
    pub filter: FilterSelection,
    pub resize: Option<BatchResize>,
    /// Quality for JPEG outputs (1-100).
    pub jpeg_quality: Option<u8>,
}

impl BatchOperations {
    /// Run the operations on one image.
    pub fn apply(&self, pipeline: &FilterPipeline, image: &Raster) -> Result<Raster, EditError> {
        let processed = pipeline.apply(image, self.adjustments, self.filter)?;
        Ok(match self.resize {
            Some(BatchResize::Pixels {
                width,
                height,
                keep_aspect,
            }) => resize(&processed, width, height, keep_aspect),
            Some(BatchResize::Percent(percent)) => resize_by_percentage(&processed, percent),
            None => processed,
        })
    }
}

/// Outcome of [`process_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Paths written, in input order.
    pub written: Vec<PathBuf>,
    /// Inputs that failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Process every file in `inputs` and write the results into `output_dir`.
///
/// The output keeps the input's extension when it is an exportable format
/// (JPEG, PNG, BMP, TIFF); anything else is written as PNG.
///
/// # Errors
///
/// Only failing to create `output_dir` aborts the batch. Per-file failures
/// are collected in [`BatchReport::failed`].
pub fn process_batch<P: AsRef<Path>>(
    inputs: &[P],
    output_dir: impl AsRef<Path>,
    operations: &BatchOperations,
    pipeline: &FilterPipeline,
) -> Result<BatchReport, EditError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    for input in inputs {
        let input = input.as_ref();
        match process_one(input, output_dir, operations, pipeline) {
            Ok(path) => report.written.push(path),
            Err(e) => {
                warn!(path = %input.display(), error = %e, "batch item failed");
                report.failed.push((input.to_path_buf(), e.to_string()));
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}

fn process_one(
    input: &Path,
    output_dir: &Path,
    operations: &BatchOperations,
    pipeline: &FilterPipeline,
) -> Result<PathBuf, EditError> {
    let image = decode_file(input)?;
    let processed = operations.apply(pipeline, &image)?;

    let quality = operations.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY);
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    let (format, ext) = match ExportFormat::from_extension(ext, quality) {
        Ok(format) => (format, ext.to_string()),
        Err(_) => (ExportFormat::Png, ExportFormat::Png.extension().to_string()),
    };

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let output = output_dir.join(format!("{stem}_processed.{ext}"));

    let bytes = encode_image(&processed, format)?;
    std::fs::write(&output, bytes)?;
    Ok(output)
}
