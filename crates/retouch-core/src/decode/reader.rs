//! Decoding from encoded bytes with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::debug;

use super::{DecodeError, ImageInfo, Orientation, SourceFormat};
use crate::raster::Raster;

/// Decode an image from bytes, applying EXIF orientation and converting to RGB8.
///
/// Accepts JPEG, PNG, BMP, GIF, TIFF and WEBP. Grayscale, alpha and 16-bit
/// sources are normalized to 8-bit RGB; alpha is discarded.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not one of the
/// accepted formats, or `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let (reader, format) = open(bytes)?;
    let orientation = extract_orientation(bytes);

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    debug!(format = format.as_str(), ?orientation, "decoded image");

    let oriented = apply_orientation(img, orientation);
    let raster = Raster::from_rgb_image(oriented.into_rgb8());
    if raster.is_empty() {
        return Err(DecodeError::CorruptedFile("image has no pixels".to_string()));
    }
    Ok(raster)
}

/// Read a file from disk and decode it with [`decode_image`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<Raster, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Read dimensions, channel count and format without decoding pixels.
pub fn image_info(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let (reader, format) = open(bytes)?;
    let orientation = extract_orientation(bytes);

    let decoder = reader
        .into_decoder()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let (width, height) = decoder.dimensions();
    let channels = decoder.color_type().channel_count();

    let (width, height) = if orientation.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    };

    Ok(ImageInfo {
        width,
        height,
        channels,
        format: Some(format),
        orientation,
        byte_size: Some(bytes.len()),
    })
}

/// Extract EXIF orientation value from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn open(bytes: &[u8]) -> Result<(ImageReader<Cursor<&[u8]>>, SourceFormat), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let format = reader
        .format()
        .and_then(SourceFormat::from_image_format)
        .ok_or(DecodeError::InvalidFormat)?;
    Ok((reader, format))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
