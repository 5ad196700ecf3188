//! Circular alpha mask centered on a point.
//!
//! The mask is fully opaque (1.0) at the center and falls to 0.0 at
//! `radius` pixels away. Beyond the radius it stays at 0.0.

use serde::{Deserialize, Serialize};

use super::smootherstep;

/// Shape of the transition from center to edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// `1 - d / radius`
    #[default]
    Linear,
    /// Smootherstep of the linear value.
    Smooth,
}

/// Radial alpha mask in pixel coordinates.
///
/// # Example
/// ```
/// use retouch_core::mask::RadialMask;
///
/// let mask = RadialMask::centered(100, 100, 1.0);
/// assert!(mask.evaluate(50.0, 50.0) > 0.99);
/// assert!(mask.evaluate(0.0, 50.0) < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialMask {
    /// Center X in pixels
    pub center_x: f32,
    /// Center Y in pixels
    pub center_y: f32,
    /// Distance in pixels at which alpha reaches zero
    pub radius: f32,
    pub falloff: Falloff,
}

impl RadialMask {
    /// Mask centered on a `width` x `height` image.
    ///
    /// The radius is half the shorter side divided by `strength`, so larger
    /// strengths pull the dark edge toward the center. Non-positive strengths
    /// are treated as 1.0.
    pub fn centered(width: u32, height: u32, strength: f32) -> Self {
        let strength = if strength > 0.0 && strength.is_finite() {
            strength
        } else {
            1.0
        };
        Self {
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            radius: (width.min(height) as f32 / 2.0 / strength).max(0.5),
            falloff: Falloff::Linear,
        }
    }

    /// Use a different falloff shape.
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    /// Alpha at pixel position `(x, y)`.
    #[inline]
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let dist = (dx * dx + dy * dy).sqrt();
        let linear = (1.0 - dist / self.radius.max(f32::EPSILON)).clamp(0.0, 1.0);
        match self.falloff {
            Falloff::Linear => linear,
            Falloff::Smooth => smootherstep(linear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_opaque() {
        let mask = RadialMask::centered(200, 100, 1.0);
        assert!((mask.evaluate(100.0, 50.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reaches_zero_at_half_short_side() {
        let mask = RadialMask::centered(200, 100, 1.0);
        assert!(mask.evaluate(100.0, 0.0).abs() < 1e-6);
        assert!(mask.evaluate(0.0, 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_midway() {
        let mask = RadialMask::centered(100, 100, 1.0);
        assert!((mask.evaluate(75.0, 50.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_strength_shrinks_radius() {
        let soft = RadialMask::centered(100, 100, 0.5);
        let hard = RadialMask::centered(100, 100, 2.0);
        assert!(soft.radius > hard.radius);
        assert!(soft.evaluate(80.0, 50.0) > hard.evaluate(80.0, 50.0));
    }

    #[test]
    fn test_invalid_strength_defaults() {
        assert_eq!(RadialMask::centered(10, 10, 0.0), RadialMask::centered(10, 10, 1.0));
        assert_eq!(
            RadialMask::centered(10, 10, f32::NAN),
            RadialMask::centered(10, 10, 1.0)
        );
    }

    #[test]
    fn test_smooth_falloff_matches_at_ends() {
        let mask = RadialMask::centered(100, 100, 1.0).with_falloff(Falloff::Smooth);
        assert!((mask.evaluate(50.0, 50.0) - 1.0).abs() < 1e-6);
        assert!(mask.evaluate(100.0, 50.0).abs() < 1e-6);
        assert!((mask.evaluate(75.0, 50.0) - 0.5).abs() < 1e-6);
    }
}
