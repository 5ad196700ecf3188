//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Grayscale conversion, saturation, threshold and equalization all derive
//! brightness from the same weighted sum so that they agree with each other.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luma from RGB samples as an unrounded float (0.0 to 255.0).
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Calculate luma from u8 RGB values, rounded into 0-255.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma(r as f32, g as f32, b as f32).clamp(0.0, 255.0).round() as u8
}

/// Luma of an RGB pixel.
#[inline]
pub fn pixel_luma(px: [u8; 3]) -> u8 {
    luma_u8(px[0], px[1], px[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma_u8(255, 255, 255), 255);
        assert_eq!(luma_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luma_gray_is_unchanged() {
        for v in [1u8, 64, 128, 200, 254] {
            assert_eq!(luma_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 = 76.2
        assert_eq!(luma_u8(255, 0, 0), 76);
        // 0.587 * 255 = 149.7
        assert_eq!(luma_u8(0, 255, 0), 150);
        // 0.114 * 255 = 29.1
        assert_eq!(luma_u8(0, 0, 255), 29);
    }
}
