//! Linear RGB triplet.

use kelvin_math::Vec3;

/// Linear RGB produced by the pipeline.
///
/// Components are never clamped or gamma-encoded. Negative values or values
/// above one mark a temperature whose color falls outside the gamut of the
/// chosen primaries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbColor {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl RgbColor {
    /// Creates a color from components.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// True when any component lies outside `[0, 1]`.
    pub fn is_out_of_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.to_vec3().is_finite()
    }

    /// As a math vector.
    #[inline]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// As an `[r, g, b]` array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Vec3> for RgbColor {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
