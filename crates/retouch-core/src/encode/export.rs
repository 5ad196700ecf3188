//! Format selection and encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::Raster;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// No encoder for the requested file extension
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The encoder itself failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: &'static str, reason: String },
}

/// Output container for [`encode_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum ExportFormat {
    /// Lossy; quality 1-100 (out-of-range values are clamped).
    Jpeg { quality: u8 },
    #[default]
    Png,
    Bmp,
    Tiff,
}

impl ExportFormat {
    /// Pick a format from a file extension (without the dot), ignoring case.
    pub fn from_extension(ext: &str, jpeg_quality: u8) -> Result<Self, EncodeError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg {
                quality: jpeg_quality,
            }),
            "png" => Ok(ExportFormat::Png),
            "bmp" => Ok(ExportFormat::Bmp),
            "tif" | "tiff" => Ok(ExportFormat::Tiff),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Tiff => "tiff",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "JPEG",
            ExportFormat::Png => "PNG",
            ExportFormat::Bmp => "BMP",
            ExportFormat::Tiff => "TIFF",
        }
    }
}

/// Encode a raster in the given format.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidDimensions`] or
/// [`EncodeError::InvalidPixelData`] for malformed rasters, and
/// [`EncodeError::EncodingFailed`] if the encoder reports an error.
pub fn encode_image(image: &Raster, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        ExportFormat::Jpeg { quality } => {
            encode_jpeg(&image.pixels, image.width, image.height, quality)
        }
        ExportFormat::Png => encode_with(image, ImageFormat::Png, format),
        ExportFormat::Bmp => encode_with(image, ImageFormat::Bmp, format),
        ExportFormat::Tiff => encode_with(image, ImageFormat::Tiff, format),
    }
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_buffer(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            reason: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

fn encode_with(
    image: &Raster,
    image_format: ImageFormat,
    format: ExportFormat,
) -> Result<Vec<u8>, EncodeError> {
    check_buffer(&image.pixels, image.width, image.height)?;

    let mut buffer = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut buffer,
        &image.pixels,
        image.width,
        image.height,
        ExtendedColorType::Rgb8,
        image_format,
    )
    .map_err(|e| EncodeError::EncodingFailed {
        format: format.name(),
        reason: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

fn check_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
