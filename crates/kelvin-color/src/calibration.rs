//! Calibration against a reference luminance.
//!
//! A calibration pins one sweep input (a temperature, or a voltage in
//! voltage mode) to a measured luminance. The ratio
//!
//! ```text
//! coefficient = reference_luminance / Y(reference)
//! ```
//!
//! is computed once per run and multiplies every XYZ value before the RGB
//! transform, so the reference point reproduces the measured luminance.

use kelvin_spectral::{ColorMatcher, Filament, XyzColor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ColorError, ColorResult, SweepMode};

/// A reference point with known luminance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Reference input: a temperature (K) or a voltage (V), matching the
    /// sweep mode.
    pub reference: f64,
    /// Measured luminance at the reference (lm sr^-1 m^-2).
    pub luminance: f64,
}

impl Calibration {
    /// Creates a calibration reference.
    pub const fn new(reference: f64, luminance: f64) -> Self {
        Self {
            reference,
            luminance,
        }
    }

    /// Both values must be strictly positive.
    pub fn validate(&self) -> ColorResult<()> {
        if !(self.reference > 0.0) {
            return Err(ColorError::invalid("reference", self.reference, "must be > 0"));
        }
        if !(self.luminance > 0.0) {
            return Err(ColorError::invalid("luminance", self.luminance, "must be > 0"));
        }
        Ok(())
    }

    /// Computes the calibration coefficient for a run.
    ///
    /// Fails when the reference point integrates to zero luminance, since no
    /// finite coefficient can match it.
    pub fn resolve(
        &self,
        mode: SweepMode,
        filament: &Filament,
        matcher: &ColorMatcher<'_>,
    ) -> ColorResult<ResolvedCalibration> {
        self.validate()?;

        let temperature_k = mode.temperature(self.reference, filament);
        let uncalibrated = matcher.xyz(temperature_k)?;
        let coefficient = self.luminance / uncalibrated.y;
        if !(coefficient.is_finite() && coefficient > 0.0) {
            return Err(ColorError::invalid(
                "reference",
                self.reference,
                "integrates to zero luminance",
            ));
        }

        debug!(
            reference = self.reference,
            temperature_k,
            uncalibrated_y = uncalibrated.y,
            coefficient,
            "resolved calibration"
        );

        Ok(ResolvedCalibration {
            reference: *self,
            temperature_k,
            uncalibrated,
            coefficient,
        })
    }
}

/// A calibration with its coefficient computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCalibration {
    /// The reference it was computed from.
    pub reference: Calibration,
    /// Temperature of the reference point (K).
    pub temperature_k: f64,
    /// XYZ at the reference before calibration.
    pub uncalibrated: XyzColor,
    /// Multiplier applied to every XYZ value.
    pub coefficient: f64,
}

impl ResolvedCalibration {
    /// Applies the coefficient to a tristimulus value.
    #[inline]
    pub fn apply(&self, xyz: XyzColor) -> XyzColor {
        xyz.scale(self.coefficient)
    }
}
