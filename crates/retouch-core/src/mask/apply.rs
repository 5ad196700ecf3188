//! Mask-weighted compositing.

use super::RadialMask;
use crate::raster::{clamp_u8, Raster};

/// Composite `image` over a solid `fill` using `mask` as the image's alpha.
///
/// `output = image * alpha + fill * (1 - alpha)`, evaluated at pixel centers.
pub fn composite_over(image: &Raster, fill: [u8; 3], mask: &RadialMask) -> Raster {
    let mut output = Vec::with_capacity(image.pixels.len());
    let width = image.width.max(1);

    for (idx, chunk) in image.pixels.chunks_exact(3).enumerate() {
        let px = (idx as u32) % width;
        let py = (idx as u32) / width;
        let alpha = mask.evaluate(px as f32 + 0.5, py as f32 + 0.5);

        // Skip the blend math where the mask is fully opaque
        if alpha >= 1.0 {
            output.extend_from_slice(chunk);
            continue;
        }
        for c in 0..3 {
            let v = chunk[c] as f32 * alpha + fill[c] as f32 * (1.0 - alpha);
            output.push(clamp_u8(v));
        }
    }

    Raster {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}
