//! # kelvin-spectral
//!
//! The physics half of the kelvin pipeline: from a temperature (or a lamp
//! voltage) to CIE XYZ tristimulus values.
//!
//! - [`planck`] - black-body spectral radiance (Planck's law)
//! - [`filament`] - lamp voltage to tungsten filament temperature (Kykta)
//! - [`cmf`] - tabulated color-matching functions
//! - [`matcher`] - radiance x CMF integration to XYZ
//!
//! # Architecture
//!
//! ```text
//!   voltage --(filament)--> temperature
//!                                |
//!   CmfTable rows ---> planck(lambda_i, T) * cmf_i ---> simpson ---> XYZ
//! ```
//!
//! # Usage
//!
//! ```rust
//! use kelvin_spectral::{CmfTable, ColorMatcher};
//!
//! let table = CmfTable::analytic_cie1931(380.0, 780.0, 5.0).unwrap();
//! let matcher = ColorMatcher::new(&table);
//! let xyz = matcher.xyz(5000.0).unwrap();
//! assert!(xyz.y > 0.0);
//! ```
//!
//! # Edge cases
//!
//! Non-positive temperatures or wavelengths are not special-cased. They
//! produce `Inf`/`NaN` that propagate to the output, which is the caller's
//! signal of an invalid input range.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cmf;
pub mod filament;
pub mod matcher;
pub mod planck;

pub use cmf::{CmfRecord, CmfTable};
pub use error::{SpectralError, SpectralResult};
pub use filament::{Filament, temperature_from_voltage};
pub use matcher::{ColorMatcher, LUMINOUS_EFFICACY, XyzColor, xyz_from_temperature};
pub use planck::{peak_wavelength, radiance};
