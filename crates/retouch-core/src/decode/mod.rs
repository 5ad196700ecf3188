//! Image decoding.
//!
//! Converts encoded bytes in any accepted container into an RGB [`Raster`],
//! correcting EXIF orientation on the way. Images that cannot be decoded are
//! reported here, before any editing operation runs.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```
//!
//! [`Raster`]: crate::raster::Raster

mod reader;
mod types;

pub use reader::{decode_file, decode_image, get_orientation, image_info};
pub use types::{DecodeError, ImageInfo, Orientation, SourceFormat};
