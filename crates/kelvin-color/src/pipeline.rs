//! XYZ to RGB pipeline.
//!
//! A [`ColorPipeline`] is a short sequence of operations applied to a
//! tristimulus vector:
//!
//! 1. Matrix transform (inverse of the RGB -> XYZ primaries matrix)
//! 2. Optional infinity-norm normalization
//!
//! [`PipelineConfig`] collects the run-level switches and builds the
//! pipeline.
//!
//! # Example
//!
//! ```rust
//! use kelvin_color::{ColorPipeline, PipelineConfig};
//! use kelvin_color::primaries::MatrixVariant;
//! use kelvin_spectral::XyzColor;
//!
//! let pipeline = PipelineConfig::new()
//!     .matrix(MatrixVariant::Srgb)
//!     .normalize(true)
//!     .build()
//!     .unwrap();
//!
//! let rgb = pipeline.apply(XyzColor::new(0.9505, 1.0, 1.089));
//! assert!((rgb.r - 1.0).abs() < 1e-3);
//! ```

use kelvin_math::{Mat3, Vec3};
use kelvin_primaries::MatrixVariant;
use kelvin_spectral::XyzColor;
use serde::{Deserialize, Serialize};

use crate::{Calibration, ColorError, ColorResult, RgbColor};

/// A single operation in the color pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// 3x3 matrix transform: `v' = M * v`.
    Matrix(Mat3),

    /// Divide by the largest absolute component, so the brightest channel
    /// has magnitude exactly 1 and channel ratios are kept. A zero vector is
    /// left as is.
    Normalize,
}

impl TransformOp {
    fn apply(&self, v: Vec3) -> Vec3 {
        match self {
            Self::Matrix(m) => m.transform(v),
            Self::Normalize => {
                let norm = v.abs().max_element();
                if norm > 0.0 { v / norm } else { v }
            }
        }
    }
}

/// An XYZ -> RGB pipeline.
///
/// Operations are applied in order, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPipeline {
    ops: Vec<TransformOp>,
}

impl ColorPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Adds an operation to the pipeline.
    pub fn push(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Adds a matrix transform.
    pub fn matrix(self, m: Mat3) -> Self {
        self.push(TransformOp::Matrix(m))
    }

    /// Adds infinity-norm normalization.
    pub fn normalize(self) -> Self {
        self.push(TransformOp::Normalize)
    }

    /// Returns the operations in the pipeline.
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Returns the number of operations in the pipeline.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies the pipeline to a tristimulus value.
    pub fn apply(&self, xyz: XyzColor) -> RgbColor {
        self.ops
            .iter()
            .fold(xyz.to_vec3(), |v, op| op.apply(v))
            .into()
    }
}

/// Maps XYZ into linear RGB through the inverse of `variant`'s matrix.
///
/// No clamping or encoding is applied.
///
/// ```rust
/// use kelvin_color::xyz_to_rgb;
/// use kelvin_color::primaries::MatrixVariant;
/// use kelvin_spectral::XyzColor;
///
/// // CIE RGB (1, 1, 1) is equal-energy white with X = Y = Z = 5.6508.
/// let rgb = xyz_to_rgb(XyzColor::new(5.6508, 5.6508, 5.6508), MatrixVariant::CieRgb);
/// assert!((rgb.g - 1.0).abs() < 1e-9);
/// ```
pub fn xyz_to_rgb(xyz: XyzColor, variant: MatrixVariant) -> RgbColor {
    variant.xyz_to_rgb().transform(xyz.to_vec3()).into()
}

/// Run-level configuration of the black-body color pipeline.
///
/// Builder-style: every switch returns `self`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// RGB -> XYZ matrix whose inverse produces RGB.
    pub matrix: MatrixVariant,
    /// Scale XYZ by 683 lm/W.
    pub luminous_efficacy: bool,
    /// Divide RGB by its largest absolute component.
    pub normalize: bool,
    /// Match a reference luminance.
    #[serde(skip)]
    pub calibration: Option<Calibration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            matrix: MatrixVariant::default(),
            luminous_efficacy: true,
            normalize: false,
            calibration: None,
        }
    }
}

impl PipelineConfig {
    /// Default configuration: CIE RGB matrix, 683 lm/W, no normalization,
    /// no calibration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the matrix variant.
    pub fn matrix(mut self, variant: MatrixVariant) -> Self {
        self.matrix = variant;
        self
    }

    /// Enables or disables the 683 lm/W scaling.
    pub fn luminous_efficacy(mut self, enabled: bool) -> Self {
        self.luminous_efficacy = enabled;
        self
    }

    /// Enables or disables RGB normalization.
    pub fn normalize(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    /// Sets or clears the calibration reference.
    pub fn calibration(mut self, calibration: Option<Calibration>) -> Self {
        self.calibration = calibration;
        self
    }

    /// Checks that the switches can be combined.
    pub fn validate(&self) -> ColorResult<()> {
        if self.normalize && self.calibration.is_some() {
            return Err(ColorError::InvalidPipeline(
                "normalization discards the calibrated luminance; enable one or the other".into(),
            ));
        }
        if let Some(calibration) = &self.calibration {
            calibration.validate()?;
        }
        Ok(())
    }

    /// Validates the configuration and builds the XYZ -> RGB pipeline.
    pub fn build(&self) -> ColorResult<ColorPipeline> {
        self.validate()?;
        let inverse = self.matrix.rgb_to_xyz().inverse().ok_or_else(|| {
            ColorError::MatrixError(format!("{} matrix is singular", self.matrix))
        })?;

        let pipeline = ColorPipeline::new().matrix(inverse);
        Ok(if self.normalize {
            pipeline.normalize()
        } else {
            pipeline
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_pipeline() {
        let xyz = XyzColor::new(0.5, 0.3, 0.2);
        assert_eq!(ColorPipeline::new().apply(xyz), RgbColor::new(0.5, 0.3, 0.2));
    }

    #[test]
    fn test_matrix_roundtrip() {
        let rgb = Vec3::new(0.5, 0.3, 0.8);
        for variant in MatrixVariant::ALL {
            let xyz = XyzColor::from(variant.rgb_to_xyz() * rgb);
            let back = xyz_to_rgb(xyz, variant);
            assert_abs_diff_eq!(back.r, rgb.x, epsilon = 1e-12);
            assert_abs_diff_eq!(back.g, rgb.y, epsilon = 1e-12);
            assert_abs_diff_eq!(back.b, rgb.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_build_matches_free_function() {
        let xyz = XyzColor::new(3.0, 2.0, 1.0);
        let pipeline = PipelineConfig::new().build().unwrap();
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.apply(xyz), xyz_to_rgb(xyz, MatrixVariant::CieRgb));
    }

    #[test]
    fn test_normalize() {
        let pipeline = ColorPipeline::new().normalize();
        let rgb = pipeline.apply(XyzColor::new(2.0, -4.0, 1.0));
        assert_eq!(rgb, RgbColor::new(0.5, -1.0, 0.25));

        let rgb = pipeline.apply(XyzColor::new(8.0, 2.0, 4.0));
        assert_eq!(rgb, RgbColor::new(1.0, 0.25, 0.5));

        assert_eq!(pipeline.apply(XyzColor::default()), RgbColor::default());
    }

    #[test]
    fn test_normalize_keeps_out_of_gamut_sign() {
        let rgb = PipelineConfig::new()
            .normalize(true)
            .build()
            .unwrap()
            .apply(XyzColor::new(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(rgb.to_vec3().abs().max_element(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_conflicts_with_calibration() {
        let config = PipelineConfig::new()
            .normalize(true)
            .calibration(Some(Calibration::new(2800.0, 100.0)));
        assert!(matches!(config.build(), Err(ColorError::InvalidPipeline(_))));
    }
}
