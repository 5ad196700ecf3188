//! Encoding rasters for export.
//!
//! JPEG goes through the `image` crate's encoder with an explicit quality;
//! the lossless formats use the crate's default settings.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::{encode_image, ExportFormat};
//!
//! let bytes = encode_image(&raster, ExportFormat::Jpeg { quality: 90 })?;
//! std::fs::write("out.jpg", bytes)?;
//! ```

mod export;

pub use export::{encode_image, encode_jpeg, EncodeError, ExportFormat, DEFAULT_JPEG_QUALITY};
