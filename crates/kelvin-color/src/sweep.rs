//! Temperature and voltage sweeps.
//!
//! [`SweepDriver`] evaluates the full chain for every point of a range:
//!
//! ```text
//! input -> temperature -> XYZ -> (calibration) -> RGB pipeline -> SweepSample
//! ```
//!
//! Points are generated by count, `value_i = min + i * step`, so floating
//! point drift never adds or loses the endpoint. A range whose width is within
//! `1e-9` steps of a multiple of `step` includes `max`.

use std::fmt;
use std::str::FromStr;

use kelvin_spectral::{CmfTable, ColorMatcher, Filament, XyzColor};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::{
    ColorError, ColorPipeline, ColorResult, PipelineConfig, ResolvedCalibration, RgbColor,
};

/// Tolerance, in steps, for admitting the endpoint of a range.
const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Largest number of points a sweep may hold.
pub const MAX_POINTS: usize = 10_000_000;

/// What the sweep range is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepMode {
    /// Inputs are temperatures (K).
    #[default]
    Temperature,
    /// Inputs are filament voltages (V), converted through the filament fit.
    Voltage,
}

impl SweepMode {
    /// Temperature (K) for an input value in this mode.
    #[inline]
    pub fn temperature(self, input: f64, filament: &Filament) -> f64 {
        match self {
            Self::Temperature => input,
            Self::Voltage => filament.temperature(input),
        }
    }

    /// Short name used in config files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Voltage => "voltage",
        }
    }
}

impl fmt::Display for SweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepMode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "temp" | "temperature" => Ok(Self::Temperature),
            "v" | "volt" | "voltage" => Ok(Self::Voltage),
            other => Err(ColorError::InvalidPipeline(format!(
                "unknown sweep mode '{other}' (expected temperature or voltage)"
            ))),
        }
    }
}

/// Range of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Input unit.
    #[serde(default)]
    pub mode: SweepMode,
    /// First input value.
    pub min: f64,
    /// Last input value (inclusive).
    pub max: f64,
    /// Increment between inputs.
    pub step: f64,
}

impl SweepParams {
    /// Creates sweep parameters. Call [`validate`](Self::validate) before use.
    pub const fn new(mode: SweepMode, min: f64, max: f64, step: f64) -> Self {
        Self {
            mode,
            min,
            max,
            step,
        }
    }

    /// Requires `min > 0`, `max > 0`, `step > 0` and `max > min`, and that
    /// the range holds at most [`MAX_POINTS`] points.
    pub fn validate(&self) -> ColorResult<()> {
        if !(self.min > 0.0) {
            return Err(ColorError::invalid("min", self.min, "must be > 0"));
        }
        if !(self.max > 0.0) {
            return Err(ColorError::invalid("max", self.max, "must be > 0"));
        }
        if !(self.step > 0.0) {
            return Err(ColorError::invalid("step", self.step, "must be > 0"));
        }
        if !(self.max > self.min) {
            return Err(ColorError::invalid("max", self.max, "must be greater than min"));
        }
        if !self.max.is_finite() {
            return Err(ColorError::invalid("max", self.max, "must be finite"));
        }
        let intervals = self.intervals();
        if !intervals.is_finite() || intervals >= MAX_POINTS as f64 {
            return Err(ColorError::invalid(
                "step",
                self.step,
                "too small for the range (more than 10000000 points)",
            ));
        }
        Ok(())
    }

    /// Whole steps from `min` to `max`, before truncation.
    fn intervals(&self) -> f64 {
        ((self.max - self.min) / self.step + ENDPOINT_TOLERANCE).floor()
    }

    /// Number of points in the range. Only meaningful once
    /// [`validate`](Self::validate) has passed.
    pub fn count(&self) -> usize {
        (self.intervals() as usize).saturating_add(1)
    }

    /// Input values in increasing order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.count()).map(move |i| self.min + i as f64 * self.step)
    }
}

/// One evaluated point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    /// Input as given: a temperature, or a voltage in voltage mode.
    pub input_value: f64,
    /// Temperature the color was computed at (K).
    pub temperature_k: f64,
    /// Tristimulus value, calibrated when a calibration is active.
    pub xyz: XyzColor,
    /// Linear RGB.
    pub rgb: RgbColor,
}

/// Result of a sweep run.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// Input unit of the samples.
    pub mode: SweepMode,
    /// Calibration applied to every sample, if any.
    pub calibration: Option<ResolvedCalibration>,
    /// Samples in increasing input order.
    pub samples: Vec<SweepSample>,
}

/// Runs sweeps against a shared CMF table.
#[derive(Debug, Clone, Copy)]
pub struct SweepDriver<'a> {
    table: &'a CmfTable,
    config: PipelineConfig,
    filament: Filament,
    parallel: bool,
}

impl<'a> SweepDriver<'a> {
    /// Creates a serial driver for the GE 47 filament.
    pub fn new(table: &'a CmfTable, config: PipelineConfig) -> Self {
        Self {
            table,
            config,
            filament: Filament::default(),
            parallel: false,
        }
    }

    /// Uses a different filament for voltage inputs.
    pub fn with_filament(mut self, filament: Filament) -> Self {
        self.filament = filament;
        self
    }

    /// Evaluates points on the rayon pool.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The filament used in voltage mode.
    pub fn filament(&self) -> &Filament {
        &self.filament
    }

    fn matcher(&self) -> ColorMatcher<'a> {
        ColorMatcher::new(self.table).with_luminous_efficacy(self.config.luminous_efficacy)
    }

    /// Evaluates a single point without calibration.
    pub fn sample(&self, mode: SweepMode, input: f64) -> ColorResult<SweepSample> {
        let pipeline = self.config.build()?;
        evaluate(
            &self.matcher(),
            &pipeline,
            &self.filament,
            mode,
            None,
            input,
        )
    }

    /// Runs a full sweep.
    ///
    /// Parameters and pipeline switches are validated before any point is
    /// computed. The calibration, if configured, is resolved once.
    pub fn run(&self, params: &SweepParams) -> ColorResult<SweepReport> {
        params.validate()?;
        let pipeline = self.config.build()?;
        let matcher = self.matcher();

        let calibration = match &self.config.calibration {
            Some(cal) => Some(cal.resolve(params.mode, &self.filament, &matcher)?),
            None => None,
        };

        trace!(
            mode = %params.mode,
            min = params.min,
            max = params.max,
            step = params.step,
            parallel = self.parallel,
            "SweepDriver::run"
        );

        let point = |input: f64| {
            evaluate(
                &matcher,
                &pipeline,
                &self.filament,
                params.mode,
                calibration.as_ref(),
                input,
            )
        };

        let samples = if self.parallel {
            let values: Vec<f64> = params.values().collect();
            values
                .into_par_iter()
                .map(point)
                .collect::<ColorResult<Vec<_>>>()?
        } else {
            params.values().map(point).collect::<ColorResult<Vec<_>>>()?
        };

        let out_of_gamut = samples.iter().filter(|s| s.rgb.is_out_of_gamut()).count();
        info!(
            mode = %params.mode,
            samples = samples.len(),
            out_of_gamut,
            calibrated = calibration.is_some(),
            "sweep complete"
        );

        Ok(SweepReport {
            mode: params.mode,
            calibration,
            samples,
        })
    }
}

fn evaluate(
    matcher: &ColorMatcher<'_>,
    pipeline: &ColorPipeline,
    filament: &Filament,
    mode: SweepMode,
    calibration: Option<&ResolvedCalibration>,
    input: f64,
) -> ColorResult<SweepSample> {
    let temperature_k = mode.temperature(input, filament);
    let xyz = matcher.xyz(temperature_k)?;
    let xyz = match calibration {
        Some(cal) => cal.apply(xyz),
        None => xyz,
    };
    Ok(SweepSample {
        input_value: input,
        temperature_k,
        xyz,
        rgb: pipeline.apply(xyz),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Calibration;
    use approx::assert_relative_eq;
    use kelvin_spectral::CmfRecord;

    fn table() -> CmfTable {
        CmfTable::analytic_cie1931(380.0, 780.0, 5.0).unwrap()
    }

    #[test]
    fn test_values_inclusive() {
        let params = SweepParams::new(SweepMode::Temperature, 1000.0, 1200.0, 100.0);
        assert_eq!(params.values().collect::<Vec<_>>(), vec![1000.0, 1100.0, 1200.0]);
    }

    #[test]
    fn test_values_drift() {
        // 0.1 steps accumulate error; the count-based loop still ends at 2.0.
        let params = SweepParams::new(SweepMode::Voltage, 1.0, 2.0, 0.1);
        assert_eq!(params.count(), 11);
        let last = params.values().last().unwrap();
        assert_relative_eq!(last, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_values_partial_step() {
        let params = SweepParams::new(SweepMode::Temperature, 1000.0, 1250.0, 100.0);
        assert_eq!(params.values().collect::<Vec<_>>(), vec![1000.0, 1100.0, 1200.0]);
    }

    #[test]
    fn test_invalid_params() {
        let cases = [
            (SweepParams::new(SweepMode::Temperature, 0.0, 100.0, 10.0), "min"),
            (SweepParams::new(SweepMode::Temperature, 10.0, -1.0, 10.0), "max"),
            (SweepParams::new(SweepMode::Temperature, 10.0, 100.0, 0.0), "step"),
            (SweepParams::new(SweepMode::Temperature, 100.0, 100.0, 1.0), "max"),
            (SweepParams::new(SweepMode::Temperature, 200.0, 100.0, 1.0), "max"),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(ColorError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter for {params:?}, got {other:?}"),
            }
        }

        let table = table();
        let driver = SweepDriver::new(&table, PipelineConfig::new());
        assert!(driver.run(&cases[0].0).is_err());
    }

    #[test]
    fn test_range_too_dense() {
        let cases = [
            SweepParams::new(SweepMode::Temperature, 1.0, 1e25, 1.0),
            SweepParams::new(SweepMode::Temperature, 1.0, 1e300, 1e-300),
            SweepParams::new(SweepMode::Temperature, 1.0, 1.0 + MAX_POINTS as f64, 1.0),
        ];
        for params in cases {
            match params.validate() {
                Err(ColorError::InvalidParameter { name, .. }) => assert_eq!(name, "step"),
                other => panic!("expected InvalidParameter for {params:?}, got {other:?}"),
            }
            // Saturates instead of overflowing.
            assert!(params.count() >= MAX_POINTS);
        }

        let table = table();
        let driver = SweepDriver::new(&table, PipelineConfig::new());
        assert!(matches!(
            driver.run(&cases[0]),
            Err(ColorError::InvalidParameter { name: "step", .. })
        ));

        // The largest admitted range still validates.
        let params = SweepParams::new(SweepMode::Temperature, 1.0, MAX_POINTS as f64, 1.0);
        params.validate().unwrap();
        assert_eq!(params.count(), MAX_POINTS);
    }

    #[test]
    fn test_temperature_sweep() {
        let table = table();
        let params = SweepParams::new(SweepMode::Temperature, 1000.0, 1200.0, 100.0);
        let report = SweepDriver::new(&table, PipelineConfig::new())
            .run(&params)
            .unwrap();

        assert_eq!(report.mode, SweepMode::Temperature);
        assert!(report.calibration.is_none());
        let inputs: Vec<f64> = report.samples.iter().map(|s| s.input_value).collect();
        assert_eq!(inputs, vec![1000.0, 1100.0, 1200.0]);
        for s in &report.samples {
            assert_eq!(s.input_value, s.temperature_k);
            assert!(s.rgb.is_finite());
        }
        // Hotter is brighter.
        assert!(report.samples[2].xyz.y > report.samples[0].xyz.y);
    }

    #[test]
    fn test_voltage_sweep() {
        let table = table();
        let params = SweepParams::new(SweepMode::Voltage, 1.0, 6.0, 1.0);
        let report = SweepDriver::new(&table, PipelineConfig::new())
            .run(&params)
            .unwrap();

        assert_eq!(report.samples.len(), 6);
        for s in &report.samples {
            assert_eq!(s.temperature_k, Filament::GE47.temperature(s.input_value));
            assert!(s.temperature_k > 0.0 && s.temperature_k.is_finite());
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let table = table();
        let params = SweepParams::new(SweepMode::Temperature, 1500.0, 9000.0, 250.0);
        let driver = SweepDriver::new(&table, PipelineConfig::new().normalize(true));

        let serial = driver.run(&params).unwrap();
        let parallel = driver.parallel(true).run(&params).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_calibrated_sweep() {
        let table = table();
        let config = PipelineConfig::new().calibration(Some(Calibration::new(2000.0, 50.0)));
        let params = SweepParams::new(SweepMode::Temperature, 1000.0, 3000.0, 500.0);
        let report = SweepDriver::new(&table, config).run(&params).unwrap();

        let cal = report.calibration.unwrap();
        assert!(cal.coefficient > 0.0);
        let at_reference = report
            .samples
            .iter()
            .find(|s| s.input_value == 2000.0)
            .unwrap();
        assert_relative_eq!(at_reference.xyz.y, 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_normalized_sweep() {
        let table = table();
        let params = SweepParams::new(SweepMode::Temperature, 2000.0, 10000.0, 2000.0);
        let report = SweepDriver::new(&table, PipelineConfig::new().normalize(true))
            .run(&params)
            .unwrap();
        for s in &report.samples {
            assert_relative_eq!(s.rgb.to_vec3().abs().max_element(), 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_synthetic_table() {
        let table = CmfTable::new(vec![
            CmfRecord::new(500.0, 1.0, 0.0, 0.0),
            CmfRecord::new(600.0, 0.0, 1.0, 0.0),
            CmfRecord::new(700.0, 0.0, 0.0, 1.0),
        ])
        .unwrap();
        let s = SweepDriver::new(&table, PipelineConfig::new())
            .sample(SweepMode::Temperature, 5000.0)
            .unwrap();
        assert!(s.xyz.is_finite());
        assert!(s.xyz.x >= 0.0 && s.xyz.y >= 0.0 && s.xyz.z >= 0.0);
        assert!(s.rgb.is_finite());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("T".parse::<SweepMode>().unwrap(), SweepMode::Temperature);
        assert_eq!("voltage".parse::<SweepMode>().unwrap(), SweepMode::Voltage);
        assert!("amps".parse::<SweepMode>().is_err());
        assert_eq!(SweepMode::Voltage.to_string(), "voltage");
    }
}
