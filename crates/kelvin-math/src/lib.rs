//! # kelvin-math
//!
//! Math primitives for the black-body color pipeline.
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ transforms, built from rows
//! - [`Vec3`] - `glam::DVec3`, used for XYZ/RGB triplets
//! - [`simpson`] - composite Simpson's rule over evenly spaced samples
//!
//! # Design
//!
//! Everything is `f64`: radiance values span many orders of magnitude and
//! results are compared against double-precision reference output.
//! Matrices are written row by row and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use kelvin_math::{Mat3, Vec3};
//!
//! let rgb_to_xyz = Mat3::from_rows([
//!     [2.768_892, 1.751_748, 1.130_160],
//!     [1.000_000, 4.590_700, 0.060_100],
//!     [0.0, 0.056_508, 5.594_292],
//! ]);
//!
//! let xyz = rgb_to_xyz * Vec3::new(1.0, 0.5, 0.25);
//! let back = rgb_to_xyz.inverse().unwrap() * xyz;
//! assert!((back.x - 1.0).abs() < 1e-12);
//! ```
//!
//! # Used By
//!
//! - `kelvin-primaries` - RGB/XYZ matrix generation
//! - `kelvin-spectral` - tristimulus integration
//! - `kelvin-color` - XYZ to RGB conversion

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
pub mod simpson;

pub use mat3::Mat3;
pub use simpson::{IntegrateError, integrate};

/// Three-component `f64` vector for XYZ and RGB triplets.
pub type Vec3 = glam::DVec3;
