//! Alpha masks for compositing an image over a fill color.
//!
//! Masks are evaluated per pixel and return a value from 0.0 (fill only) to
//! 1.0 (image only).

pub mod apply;
pub mod radial;

pub use apply::composite_over;
pub use radial::{Falloff, RadialMask};

/// Smootherstep interpolation function.
///
/// Returns values from 0.0 to 1.0 with zero velocity and acceleration at boundaries.
///
/// Formula: `6t^5 - 15t^4 + 10t^3`
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smootherstep_boundaries() {
        assert!((smootherstep(0.0) - 0.0).abs() < f32::EPSILON);
        assert!((smootherstep(1.0) - 1.0).abs() < f32::EPSILON);
        assert!((smootherstep(0.5) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_smootherstep_clamping() {
        assert!((smootherstep(-0.5) - 0.0).abs() < f32::EPSILON);
        assert!((smootherstep(1.5) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_smootherstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let val = smootherstep(i as f32 / 100.0);
            assert!(val >= prev);
            prev = val;
        }
    }
}
