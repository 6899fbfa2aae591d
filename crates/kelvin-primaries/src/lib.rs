//! # kelvin-primaries
//!
//! RGB primaries and the RGB <-> XYZ matrices used to turn tristimulus
//! values into an RGB triplet.
//!
//! # Canonical matrix
//!
//! The pipeline's default is the CIE 1931 RGB tristimulus matrix as published
//! in CIE 15:2004 (Colorimetry, 3rd edition):
//!
//! ```text
//! | 2.768892 1.751748 1.130160 |
//! | 1.000000 4.590700 0.060100 |
//! | 0.000000 0.056508 5.594292 |
//! ```
//!
//! It is deliberately **not** normalized to Y = 1: it maps unit RGB to the
//! luminance ratios of the monochromatic 700 / 546.1 / 435.8 nm primaries.
//! Results are not portable between [`MatrixVariant`]s.
//!
//! # Usage
//!
//! ```rust
//! use kelvin_primaries::MatrixVariant;
//! use kelvin_math::Vec3;
//!
//! let variant = MatrixVariant::default();
//! let rgb = Vec3::new(0.5, 0.3, 0.8);
//! let xyz = variant.rgb_to_xyz() * rgb;
//! let back = variant.xyz_to_rgb() * xyz;
//! assert!((back.z - 0.8).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::fmt;
use std::str::FromStr;

use kelvin_math::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGB color space primaries definition.
///
/// Defines a color space by its three primaries and white point, all as CIE
/// xy chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f64, f64),
    /// Green primary (x, y) chromaticity
    pub g: (f64, f64),
    /// Blue primary (x, y) chromaticity
    pub b: (f64, f64),
    /// White point (x, y) chromaticity
    pub w: (f64, f64),
    /// Color space name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

// ============================================================================
// White Points
// ============================================================================

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

/// Equal-energy illuminant E.
pub const E_XY: (f64, f64) = (1.0 / 3.0, 1.0 / 3.0);

// ============================================================================
// Primaries
// ============================================================================

/// CIE 1931 RGB primaries: monochromatic 700, 546.1 and 435.8 nm stimuli,
/// equal-energy white.
pub const CIE_RGB: Primaries = Primaries {
    r: (0.73467, 0.26533),
    g: (0.27376, 0.71741),
    b: (0.16658, 0.00886),
    w: E_XY,
    name: "CIE RGB",
};

/// sRGB / Rec.709 primaries (D65 white point).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

// ============================================================================
// Fixed Matrices
// ============================================================================

/// CIE 1931 RGB to XYZ tristimulus matrix (CIE 15:2004).
pub const CIE_RGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [2.768_892, 1.751_748, 1.130_160],
    [1.000_000, 4.590_700, 0.060_100],
    [0.000_000, 0.056_508, 5.594_292],
]);

/// sRGB to XYZ (D65) matrix.
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

// ============================================================================
// Matrix Generation
// ============================================================================

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-12 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the Y-normalized RGB to XYZ matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Solve for per-primary scale factors so RGB (1, 1, 1) maps to the white
/// 3. Scale each primary column by its factor
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);

    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);

    // M * S = W  =>  S = M^-1 * W
    let m_inv = m.inverse().unwrap_or(Mat3::IDENTITY);
    let s = m_inv * primaries.white_xyz();

    Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix for a set of primaries.
///
/// This is the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

// ============================================================================
// Matrix Variants
// ============================================================================

/// The RGB -> XYZ matrix a pipeline inverts to produce RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixVariant {
    /// CIE 1931 RGB tristimulus matrix from CIE 15:2004 (canonical).
    #[default]
    CieRgb,
    /// sRGB / Rec.709 primaries with a D65 white, Y-normalized.
    Srgb,
}

impl MatrixVariant {
    /// All variants, in declaration order.
    pub const ALL: [Self; 2] = [Self::CieRgb, Self::Srgb];

    /// The RGB -> XYZ matrix for this variant.
    pub const fn rgb_to_xyz(self) -> Mat3 {
        match self {
            Self::CieRgb => CIE_RGB_TO_XYZ,
            Self::Srgb => SRGB_TO_XYZ,
        }
    }

    /// The XYZ -> RGB matrix: the inverse of [`MatrixVariant::rgb_to_xyz`].
    pub fn xyz_to_rgb(self) -> Mat3 {
        // Both fixed matrices are well conditioned.
        self.rgb_to_xyz().inverse().unwrap_or(Mat3::IDENTITY)
    }

    /// Primaries the variant's matrix was derived from.
    pub const fn primaries(self) -> Primaries {
        match self {
            Self::CieRgb => CIE_RGB,
            Self::Srgb => SRGB,
        }
    }

    /// Short identifier used on the command line and in run files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CieRgb => "cie-rgb",
            Self::Srgb => "srgb",
        }
    }
}

impl fmt::Display for MatrixVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown matrix variant name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown matrix variant '{0}' (expected cie-rgb or srgb)")]
pub struct UnknownVariant(pub String);

impl FromStr for MatrixVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "cie-rgb" | "cie" | "cie1931" => Ok(Self::CieRgb),
            "srgb" | "rec709" => Ok(Self::Srgb),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_srgb_matrix() {
        // The published matrix was derived from D65 as XYZ (0.95047, 1, 1.08883).
        let sum = 0.95047 + 1.0 + 1.08883;
        let srgb = Primaries {
            w: (0.95047 / sum, 1.0 / sum),
            ..SRGB
        };
        assert!(rgb_to_xyz_matrix(&srgb).max_abs_diff(&SRGB_TO_XYZ) < 1e-6);

        // Rounded D65 chromaticity moves entries by about 2.3e-4.
        assert!(rgb_to_xyz_matrix(&SRGB).max_abs_diff(&SRGB_TO_XYZ) < 5e-4);
    }

    #[test]
    fn test_cie_rgb_matches_published_matrix() {
        // The published matrix is the primaries-derived one scaled so that
        // equal-energy white has Y = 5.6508.
        let derived = rgb_to_xyz_matrix(&CIE_RGB) * 5.6508;
        assert!(derived.max_abs_diff(&CIE_RGB_TO_XYZ) < 1e-2);
    }

    #[test]
    fn test_cie_rgb_white_is_equal_energy() {
        let white = CIE_RGB_TO_XYZ * Vec3::ONE;
        assert_abs_diff_eq!(white.x, white.y, epsilon = 1e-9);
        assert_abs_diff_eq!(white.z, white.y, epsilon = 1e-9);
    }

    #[test]
    fn test_roundtrip_every_variant() {
        let rgb = Vec3::new(0.5, 0.3, 0.8);
        for variant in MatrixVariant::ALL {
            let back = variant.xyz_to_rgb() * (variant.rgb_to_xyz() * rgb);
            assert_abs_diff_eq!(back.x, rgb.x, epsilon = 1e-12);
            assert_abs_diff_eq!(back.y, rgb.y, epsilon = 1e-12);
            assert_abs_diff_eq!(back.z, rgb.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("CIE_RGB".parse::<MatrixVariant>(), Ok(MatrixVariant::CieRgb));
        assert_eq!("srgb".parse::<MatrixVariant>(), Ok(MatrixVariant::Srgb));
        let err = "p3".parse::<MatrixVariant>().unwrap_err();
        assert_eq!(err, UnknownVariant("p3".into()));
        assert_eq!(
            err.to_string(),
            "unknown matrix variant 'p3' (expected cie-rgb or srgb)"
        );
        for variant in MatrixVariant::ALL {
            assert_eq!(variant.to_string().parse::<MatrixVariant>(), Ok(variant));
        }
    }

    #[test]
    fn test_variant_serde() {
        let v: MatrixVariant = serde_yaml::from_str("srgb").unwrap();
        assert_eq!(v, MatrixVariant::Srgb);
        let v: MatrixVariant = serde_yaml::from_str("cie-rgb").unwrap();
        assert_eq!(v, MatrixVariant::CieRgb);
        assert_eq!(MatrixVariant::default().primaries().name, "CIE RGB");
    }
}
