//! Incandescent lamp voltage to filament temperature.
//!
//! Empirical power law due to Martin Kykta, relating terminal voltage to the
//! temperature of a tungsten filament of known geometry:
//!
//! ```text
//! b1 = (2 sigma eps 2.96e8^4)^-0.232 / pi
//! b2 = (2 pi sigma eps b1)^-0.25
//! B2 = b2 * L^-0.384 * r^0.192
//! T  = B2 * |V|^0.384
//! ```
//!
//! The relation does not hold near zero volts. Nothing here guards against
//! that; callers must keep voltages bounded away from zero.
//!
//! # Reference
//!
//! Kykta, M. (2022). Incandescent lamp design and lifetime. *AIP Advances*
//! 12, 105116.

use std::f64::consts::PI;

/// Stefan-Boltzmann constant (W m^-2 K^-4).
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Emissivity of tungsten used by the fit.
pub const TUNGSTEN_EMISSIVITY: f64 = 0.28;

/// Reference constant of the fit.
const KYKTA_REFERENCE: f64 = 2.96e8;

/// Exponent applied to the voltage.
const VOLTAGE_EXPONENT: f64 = 0.384;

/// Filament geometry and material for the voltage fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filament {
    /// Filament length (m).
    pub length_m: f64,
    /// Filament wire radius (m).
    pub radius_m: f64,
    /// Emissivity of the filament material.
    pub emissivity: f64,
}

impl Filament {
    /// GE 47 pilot lamp (6.3 V), the reference lamp of the fit.
    pub const GE47: Self = Self {
        length_m: 0.023_14,
        radius_m: 0.000_010_91,
        emissivity: TUNGSTEN_EMISSIVITY,
    };

    /// Creates a tungsten filament with the given geometry.
    pub const fn tungsten(length_m: f64, radius_m: f64) -> Self {
        Self {
            length_m,
            radius_m,
            emissivity: TUNGSTEN_EMISSIVITY,
        }
    }

    /// The lamp constant `B2` such that `T = B2 * |V|^0.384`.
    pub fn coefficient(&self) -> f64 {
        let sigma_eps = STEFAN_BOLTZMANN * self.emissivity;

        let b1 = (2.0 * sigma_eps * KYKTA_REFERENCE.powi(4)).powf(-0.232) / PI;
        let b2 = (2.0 * PI * sigma_eps * b1).powf(-0.25);

        b2 * self.length_m.powf(-0.384) * self.radius_m.powf(0.192)
    }

    /// Filament temperature (K) at the given terminal voltage.
    ///
    /// The sign of the voltage is ignored.
    pub fn temperature(&self, voltage: f64) -> f64 {
        self.coefficient() * voltage.abs().powf(VOLTAGE_EXPONENT)
    }

    /// Terminal voltage that drives the filament to `temperature_k`.
    pub fn voltage(&self, temperature_k: f64) -> f64 {
        (temperature_k / self.coefficient()).powf(1.0 / VOLTAGE_EXPONENT)
    }
}

impl Default for Filament {
    fn default() -> Self {
        Self::GE47
    }
}

/// Filament temperature (K) of the reference GE 47 lamp at `voltage`.
///
/// # Example
///
/// ```rust
/// use kelvin_spectral::temperature_from_voltage;
///
/// let t = temperature_from_voltage(6.3);
/// assert!(t > 2000.0 && t < 3500.0);
/// ```
#[inline]
pub fn temperature_from_voltage(voltage: f64) -> f64 {
    Filament::GE47.temperature(voltage)
}
