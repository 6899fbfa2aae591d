//! Black-body spectral radiance.
//!
//! # Formula
//!
//! Planck's law per unit wavelength:
//!
//! ```text
//! B(lambda, T) = 2 h c^2 / (lambda^5 * (exp(h c / (lambda k_B T)) - 1))
//! ```
//!
//! in W sr^-1 m^-3. The `exp(x) - 1` term uses [`f64::exp_m1`], which stays
//! accurate as `x -> 0` (long wavelengths, hot bodies).
//!
//! # Reference
//!
//! CIE 15:2004 Colorimetry, 3rd edition.

/// Planck constant (J Hz^-1).
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Speed of light in vacuum (m s^-1).
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// Boltzmann constant (J K^-1).
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Wien's displacement constant (m K).
pub const WIEN_DISPLACEMENT: f64 = 2.897_771_955e-3;

/// Spectral radiance of a black body.
///
/// `wavelength_m` is in meters, `temperature_k` in kelvin; the result is in
/// W sr^-1 m^-3. Both inputs must be strictly positive; zero or negative
/// values yield non-finite or meaningless output and are not checked.
///
/// # Example
///
/// ```rust
/// use kelvin_spectral::radiance;
///
/// let b = radiance(500e-9, 5000.0);
/// assert!(b > 1.0e13 && b < 1.5e13);
/// ```
#[inline]
pub fn radiance(wavelength_m: f64, temperature_k: f64) -> f64 {
    let numerator = 2.0 * PLANCK * SPEED_OF_LIGHT * SPEED_OF_LIGHT;
    let exponent = PLANCK * SPEED_OF_LIGHT / (wavelength_m * BOLTZMANN * temperature_k);
    let denominator = wavelength_m.powi(5) * exponent.exp_m1();

    numerator / denominator
}

/// Wavelength of peak spectral radiance (m), by Wien's displacement law.
///
/// ```rust
/// use kelvin_spectral::peak_wavelength;
///
/// // The sun peaks in the green.
/// let peak_nm = peak_wavelength(5778.0) * 1e9;
/// assert!((peak_nm - 501.5).abs() < 1.0);
/// ```
#[inline]
pub fn peak_wavelength(temperature_k: f64) -> f64 {
    WIEN_DISPLACEMENT / temperature_k
}
