//! Tabulated CIE color-matching functions.
//!
//! A [`CmfTable`] is an ordered list of `(wavelength_nm, x_bar, y_bar, z_bar)`
//! records, sorted by increasing wavelength and assumed evenly spaced. The
//! table is built once per run and only ever read afterwards.
//!
//! Tables usually come from a CSV file (see `kelvin-io`). When none is
//! available, [`CmfTable::analytic_cie1931`] generates one from the
//! multi-lobe Gaussian fit of Wyman, Sloan and Shirley (2013) to the CIE 1931
//! 2-degree observer.

use crate::{SpectralError, SpectralResult};

/// One row of a color-matching table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CmfRecord {
    /// Wavelength (nm).
    pub wavelength_nm: f64,
    /// X color-matching value.
    pub x_bar: f64,
    /// Y color-matching value.
    pub y_bar: f64,
    /// Z color-matching value.
    pub z_bar: f64,
}

impl CmfRecord {
    /// Creates a record.
    #[inline]
    pub const fn new(wavelength_nm: f64, x_bar: f64, y_bar: f64, z_bar: f64) -> Self {
        Self {
            wavelength_nm,
            x_bar,
            y_bar,
            z_bar,
        }
    }

    /// Builds a record from four fields in file order.
    #[inline]
    pub const fn from_array(fields: [f64; 4]) -> Self {
        Self::new(fields[0], fields[1], fields[2], fields[3])
    }
}

/// Color-matching functions sampled at evenly spaced wavelengths.
///
/// Invariant: holds at least 3 records (enough for one Simpson panel).
#[derive(Debug, Clone, PartialEq)]
pub struct CmfTable {
    records: Vec<CmfRecord>,
}

impl CmfTable {
    /// Minimum number of records a table must hold.
    pub const MIN_RECORDS: usize = 3;

    /// Wraps records into a table.
    ///
    /// Ordering and spacing are not verified; integration uses the first
    /// interval as the spacing for the whole table.
    pub fn new(records: Vec<CmfRecord>) -> SpectralResult<Self> {
        if records.len() < Self::MIN_RECORDS {
            return Err(SpectralError::TooFewRecords(records.len()));
        }
        Ok(Self { records })
    }

    /// Generates a table from the analytic CIE 1931 2-degree fit.
    ///
    /// Samples `start_nm..=end_nm` every `step_nm`.
    ///
    /// ```rust
    /// use kelvin_spectral::CmfTable;
    ///
    /// let table = CmfTable::analytic_cie1931(380.0, 780.0, 5.0).unwrap();
    /// assert_eq!(table.len(), 81);
    /// assert_eq!(table.spacing(), 5.0);
    /// ```
    pub fn analytic_cie1931(start_nm: f64, end_nm: f64, step_nm: f64) -> SpectralResult<Self> {
        if !(step_nm > 0.0 && end_nm > start_nm && start_nm > 0.0) {
            return Err(SpectralError::InvalidRange(format!(
                "{start_nm}..={end_nm} nm step {step_nm}"
            )));
        }
        let steps = ((end_nm - start_nm) / step_nm + 1e-9).floor() as usize;
        let records = (0..=steps)
            .map(|i| {
                let nm = start_nm + i as f64 * step_nm;
                CmfRecord::new(nm, x_fit_1931(nm), y_fit_1931(nm), z_fit_1931(nm))
            })
            .collect();
        Self::new(records)
    }

    /// Records in wavelength order.
    #[inline]
    pub fn records(&self) -> &[CmfRecord] {
        &self.records
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Spacing between samples (nm), taken from the first interval.
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.records[1].wavelength_nm - self.records[0].wavelength_nm
    }

    /// First and last wavelengths (nm).
    pub fn wavelength_range(&self) -> (f64, f64) {
        let first = self.records[0].wavelength_nm;
        let last = self.records[self.records.len() - 1].wavelength_nm;
        (first, last)
    }

    /// True when every interval matches the first one within `tolerance_nm`.
    pub fn is_uniform(&self, tolerance_nm: f64) -> bool {
        let spacing = self.spacing();
        self.records
            .windows(2)
            .all(|w| (w[1].wavelength_nm - w[0].wavelength_nm - spacing).abs() <= tolerance_nm)
    }
}

/// Asymmetric Gaussian lobe used by the analytic fit.
#[inline]
fn lobe(lambda: f64, mu: f64, inv_sigma_lo: f64, inv_sigma_hi: f64) -> f64 {
    let t = (lambda - mu) * if lambda < mu { inv_sigma_lo } else { inv_sigma_hi };
    (-0.5 * t * t).exp()
}

/// Analytic CIE 1931 x_bar.
pub fn x_fit_1931(lambda: f64) -> f64 {
    0.362 * lobe(lambda, 442.0, 0.0624, 0.0374) + 1.056 * lobe(lambda, 599.8, 0.0264, 0.0323)
        - 0.065 * lobe(lambda, 501.1, 0.0490, 0.0382)
}

/// Analytic CIE 1931 y_bar.
pub fn y_fit_1931(lambda: f64) -> f64 {
    0.821 * lobe(lambda, 568.8, 0.0213, 0.0247) + 0.286 * lobe(lambda, 530.9, 0.0613, 0.0322)
}

/// Analytic CIE 1931 z_bar.
pub fn z_fit_1931(lambda: f64) -> f64 {
    1.217 * lobe(lambda, 437.0, 0.0845, 0.0278) + 0.681 * lobe(lambda, 459.0, 0.0385, 0.0725)
}
