//! 3x3 matrix for RGB <-> XYZ transforms.
//!
//! [`Mat3`] wraps [`glam::DMat3`]. It is built from rows, the way
//! colorimetry references print their matrices, and applied to column
//! vectors:
//!
//! ```text
//! | m00 m01 m02 |   | x |
//! | m10 m11 m12 | * | y |
//! | m20 m21 m22 |   | z |
//! ```

use std::ops::Mul;

use glam::{DMat3, DVec3};

use crate::Vec3;

/// Determinant magnitude below which a matrix is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3x3 `f64` matrix.
///
/// ```rust
/// use kelvin_math::{Mat3, Vec3};
///
/// let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// assert_eq!(m * Vec3::new(1.0, 1.0, 1.0), Vec3::new(6.0, 1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(DMat3);

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self(DMat3::IDENTITY);

    /// Creates a matrix from rows.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self(DMat3::from_cols(
            DVec3::new(r0[0], r1[0], r2[0]),
            DVec3::new(r0[1], r1[1], r2[1]),
            DVec3::new(r0[2], r1[2], r2[2]),
        ))
    }

    /// Creates a matrix from column vectors.
    pub const fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self(DMat3::from_cols(c0, c1, c2))
    }

    /// Inverse, or `None` when the determinant is (numerically) zero.
    pub fn inverse(&self) -> Option<Self> {
        if self.0.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// `self * v`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        self.0 * v
    }

    /// True when every element is finite.
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Largest absolute difference between corresponding elements.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (self.0 - other.0)
            .to_cols_array()
            .iter()
            .fold(0.0, |acc: f64, d| acc.max(d.abs()))
    }

    /// The underlying glam matrix.
    pub const fn to_glam(self) -> DMat3 {
        self.0
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<DMat3> for Mat3 {
    fn from(m: DMat3) -> Self {
        Self(m)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Mul<f64> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cie_rgb() -> Mat3 {
        Mat3::from_rows([
            [2.768_892, 1.751_748, 1.130_160],
            [1.000_000, 4.590_700, 0.060_100],
            [0.0, 0.056_508, 5.594_292],
        ])
    }

    #[test]
    fn test_from_rows_layout() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        // First column of the printed matrix.
        assert_eq!(m * Vec3::X, Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.to_glam().row(2), Vec3::new(7.0, 8.0, 9.0));

        let c = Mat3::from_col_vecs(Vec3::new(1.0, 4.0, 7.0), Vec3::Y, Vec3::Z);
        assert_eq!(c * Vec3::X, m * Vec3::X);
    }

    #[test]
    fn test_inverse() {
        let m = cie_rgb();
        let inv = m.inverse().unwrap();
        assert!((m * inv).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
        assert!((inv * m).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
        assert!(inv.is_finite());
    }

    #[test]
    fn test_singular() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0], // Row 2 = 2 * Row 1
            [1.0, 1.0, 1.0],
        ]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_scale_and_diff() {
        let m = cie_rgb();
        assert_eq!((m * 2.0) * Vec3::ONE, (m * Vec3::ONE) * 2.0);
        assert_eq!(m.max_abs_diff(&m), 0.0);
        assert!((m.max_abs_diff(&Mat3::IDENTITY) - 4.5907).abs() < 1e-12);
    }
}
