//! Geometric operations: rotation, mirroring, cropping and resampling.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are integer pixels; `right` and `bottom` are exclusive
//! - Origin is top-left corner
//!
//! Degenerate requests (empty crop rectangle, zero target size, non-positive
//! percentage) return a copy of the input.

mod crop;
mod flip;
mod resize;
mod rotation;

use serde::{Deserialize, Serialize};

use crate::raster::Raster;

pub use crop::crop;
pub use flip::{flip_horizontal, flip_vertical};
pub use resize::{percentage_target, resize, resize_by_percentage, resize_target};
pub use rotation::{compute_rotated_bounds, rotate, rotate_with, InterpolationFilter};

/// A single geometric edit, as recorded by an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GeometryOp {
    /// Clockwise rotation in degrees.
    Rotate { degrees: f64 },
    FlipHorizontal,
    FlipVertical,
    Crop {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
    },
    Resize {
        width: i64,
        height: i64,
        keep_aspect: bool,
    },
    ResizePercent { percent: f64 },
}

impl GeometryOp {
    /// Run this operation on `image`.
    pub fn apply(&self, image: &Raster, filter: InterpolationFilter) -> Raster {
        match *self {
            GeometryOp::Rotate { degrees } => rotate_with(image, degrees, filter),
            GeometryOp::FlipHorizontal => flip_horizontal(image),
            GeometryOp::FlipVertical => flip_vertical(image),
            GeometryOp::Crop {
                left,
                top,
                right,
                bottom,
            } => crop(image, left, top, right, bottom),
            GeometryOp::Resize {
                width,
                height,
                keep_aspect,
            } => resize(image, width, height, keep_aspect),
            GeometryOp::ResizePercent { percent } => resize_by_percentage(image, percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_op_dispatch() {
        let img = Raster::filled(40, 20, [1, 2, 3]);
        let rotated = GeometryOp::Rotate { degrees: 90.0 }.apply(&img, InterpolationFilter::Bicubic);
        assert_eq!((rotated.width, rotated.height), (20, 40));

        let cropped = GeometryOp::Crop {
            left: 0,
            top: 0,
            right: 10,
            bottom: 5,
        }
        .apply(&img, InterpolationFilter::Bicubic);
        assert_eq!((cropped.width, cropped.height), (10, 5));

        let scaled = GeometryOp::ResizePercent { percent: 50.0 }.apply(&img, InterpolationFilter::Bicubic);
        assert_eq!((scaled.width, scaled.height), (20, 10));
    }

    #[test]
    fn test_geometry_op_serde_tagged() {
        let op: GeometryOp = serde_json::from_str(r#"{"op":"rotate","degrees":45.0}"#).unwrap();
        assert_eq!(op, GeometryOp::Rotate { degrees: 45.0 });
        let op: GeometryOp = serde_json::from_str(r#"{"op":"flip_horizontal"}"#).unwrap();
        assert_eq!(op, GeometryOp::FlipHorizontal);
    }
}
