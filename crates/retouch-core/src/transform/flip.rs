//! Mirror operations.

use crate::raster::Raster;

/// Mirror the image left to right.
pub fn flip_horizontal(image: &Raster) -> Raster {
    let mut output = Vec::with_capacity(image.pixels.len());
    let row_bytes = image.width as usize * 3;
    if row_bytes == 0 {
        return image.clone();
    }
    for row in image.pixels.chunks_exact(row_bytes) {
        for px in row.chunks_exact(3).rev() {
            output.extend_from_slice(px);
        }
    }
    Raster {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}

/// Mirror the image top to bottom.
pub fn flip_vertical(image: &Raster) -> Raster {
    let mut output = Vec::with_capacity(image.pixels.len());
    let row_bytes = image.width as usize * 3;
    if row_bytes == 0 {
        return image.clone();
    }
    for row in image.pixels.chunks_exact(row_bytes).rev() {
        output.extend_from_slice(row);
    }
    Raster {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}
