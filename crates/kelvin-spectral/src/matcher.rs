//! Black-body tristimulus integration.
//!
//! For each table row the black-body radiance at that wavelength is weighted
//! by the three color-matching values, and each weighted channel is
//! integrated with the composite Simpson's rule:
//!
//! ```text
//! X = integral(B(lambda, T) * x_bar(lambda)) d lambda     (lambda in nm)
//! ```
//!
//! The integration step is the table's first interval; non-uniform tables
//! are integrated as if they were uniform.
//!
//! With luminous efficacy enabled the result is multiplied by 683 lm/W,
//! turning radiance into luminance (Y in cd m^-2 up to the nm/m factor of
//! the integration variable). A run must use one setting throughout.

use kelvin_math::{Vec3, integrate};
use tracing::trace;

use crate::{CmfTable, SpectralResult, radiance};

/// Maximum spectral luminous efficacy (lm W^-1).
pub const LUMINOUS_EFFICACY: f64 = 683.0;

/// CIE XYZ tristimulus values. `y` is proportional to luminance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XyzColor {
    /// X tristimulus value.
    pub x: f64,
    /// Y tristimulus value (luminance).
    pub y: f64,
    /// Z tristimulus value.
    pub z: f64,
}

impl XyzColor {
    /// Creates a color from components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiplies every component by `factor`.
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// CIE 1931 (x, y) chromaticity.
    ///
    /// Returns `None` for black (all components zero).
    pub fn chromaticity(self) -> Option<(f64, f64)> {
        let sum = self.x + self.y + self.z;
        if sum == 0.0 {
            None
        } else {
            Some((self.x / sum, self.y / sum))
        }
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.to_vec3().is_finite()
    }

    /// As a math vector.
    #[inline]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for XyzColor {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<XyzColor> for Vec3 {
    #[inline]
    fn from(c: XyzColor) -> Vec3 {
        c.to_vec3()
    }
}

/// Radiometric XYZ of a black body at `temperature_k`, without luminous
/// efficacy scaling.
///
/// # Example
///
/// ```rust
/// use kelvin_spectral::{CmfRecord, CmfTable, xyz_from_temperature};
///
/// let table = CmfTable::new(vec![
///     CmfRecord::new(500.0, 1.0, 0.0, 0.0),
///     CmfRecord::new(600.0, 0.0, 1.0, 0.0),
///     CmfRecord::new(700.0, 0.0, 0.0, 1.0),
/// ]).unwrap();
/// let xyz = xyz_from_temperature(5000.0, &table).unwrap();
/// assert!(xyz.is_finite() && xyz.x > 0.0 && xyz.y > 0.0 && xyz.z > 0.0);
/// ```
pub fn xyz_from_temperature(temperature_k: f64, table: &CmfTable) -> SpectralResult<XyzColor> {
    let records = table.records();
    let mut x_bar = Vec::with_capacity(records.len());
    let mut y_bar = Vec::with_capacity(records.len());
    let mut z_bar = Vec::with_capacity(records.len());

    for record in records {
        let b = radiance(record.wavelength_nm * 1e-9, temperature_k);
        x_bar.push(record.x_bar * b);
        y_bar.push(record.y_bar * b);
        z_bar.push(record.z_bar * b);
    }

    let h = table.spacing();
    Ok(XyzColor::new(
        integrate(&x_bar, h)?,
        integrate(&y_bar, h)?,
        integrate(&z_bar, h)?,
    ))
}

/// Integrates black-body spectra against a borrowed CMF table.
///
/// The table is shared read-only, so one matcher can serve every step of a
/// sweep, including from several threads.
#[derive(Debug, Clone, Copy)]
pub struct ColorMatcher<'a> {
    table: &'a CmfTable,
    luminous_efficacy: bool,
}

impl<'a> ColorMatcher<'a> {
    /// Creates a matcher with luminous efficacy scaling enabled.
    pub fn new(table: &'a CmfTable) -> Self {
        Self {
            table,
            luminous_efficacy: true,
        }
    }

    /// Enables or disables the 683 lm/W scaling.
    pub fn with_luminous_efficacy(mut self, enabled: bool) -> Self {
        self.luminous_efficacy = enabled;
        self
    }

    /// Whether 683 lm/W scaling is applied.
    pub fn luminous_efficacy(&self) -> bool {
        self.luminous_efficacy
    }

    /// The table being integrated against.
    pub fn table(&self) -> &'a CmfTable {
        self.table
    }

    /// XYZ of a black body at `temperature_k`.
    pub fn xyz(&self, temperature_k: f64) -> SpectralResult<XyzColor> {
        let xyz = xyz_from_temperature(temperature_k, self.table)?;
        let xyz = if self.luminous_efficacy {
            xyz.scale(LUMINOUS_EFFICACY)
        } else {
            xyz
        };
        trace!(temperature_k, x = xyz.x, y = xyz.y, z = xyz.z, "ColorMatcher::xyz");
        Ok(xyz)
    }
}
