//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Container formats accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
    Tiff,
    WebP,
}

impl SourceFormat {
    /// Map from the `image` crate's format; `None` for formats we do not accept.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            image::ImageFormat::Png => Some(SourceFormat::Png),
            image::ImageFormat::Bmp => Some(SourceFormat::Bmp),
            image::ImageFormat::Gif => Some(SourceFormat::Gif),
            image::ImageFormat::Tiff => Some(SourceFormat::Tiff),
            image::ImageFormat::WebP => Some(SourceFormat::WebP),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Png => "PNG",
            SourceFormat::Bmp => "BMP",
            SourceFormat::Gif => "GIF",
            SourceFormat::Tiff => "TIFF",
            SourceFormat::WebP => "WEBP",
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Summary of an encoded image, read without decoding the pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Width after orientation correction.
    pub width: u32,
    /// Height after orientation correction.
    pub height: u32,
    /// Channels in the source color type (1-4); decoded rasters always have 3.
    pub channels: u8,
    /// Container format, `None` for in-memory rasters.
    pub format: Option<SourceFormat>,
    pub orientation: Orientation,
    /// Encoded size in bytes, when known.
    pub byte_size: Option<usize>,
}

impl ImageInfo {
    /// Human-readable one-line description.
    pub fn summary(&self) -> String {
        let format = self.format.map(|f| f.as_str()).unwrap_or("Unknown");
        match self.byte_size {
            Some(bytes) => format!(
                "{}x{} {} ({} channels, {:.1} KB)",
                self.width,
                self.height,
                format,
                self.channels,
                bytes as f64 / 1024.0
            ),
            None => format!(
                "{}x{} {} ({} channels)",
                self.width, self.height, format, self.channels
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::FlipHorizontal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(!Orientation::FlipVertical.swaps_dimensions());

        assert!(Orientation::Transpose.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
        assert!(Orientation::Rotate270CW.swaps_dimensions());
    }

    #[test]
    fn test_source_format_mapping() {
        assert_eq!(
            SourceFormat::from_image_format(image::ImageFormat::WebP),
            Some(SourceFormat::WebP)
        );
        assert_eq!(SourceFormat::from_image_format(image::ImageFormat::Ico), None);
    }

    #[test]
    fn test_info_summary() {
        let info = ImageInfo {
            width: 640,
            height: 480,
            channels: 3,
            format: Some(SourceFormat::Png),
            orientation: Orientation::Normal,
            byte_size: Some(2048),
        };
        assert_eq!(info.summary(), "640x480 PNG (3 channels, 2.0 KB)");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
        let err = DecodeError::CorruptedFile("truncated".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: truncated");
    }
}
