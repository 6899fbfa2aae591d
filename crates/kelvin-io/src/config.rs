//! YAML run files.
//!
//! A run file describes a sweep so it can be repeated without retyping
//! parameters:
//!
//! ```yaml
//! mode: voltage
//! min: 1.0
//! max: 6.3
//! step: 0.1
//! reference:
//!   reference: 6.3
//!   luminance: 1.2e6
//! matrix: cie-rgb
//! luminous_efficacy: true
//! normalize: false
//! parallel: true
//! cmf: CIE_xyz_1931_2deg.csv
//! output: ge47.csv
//! ```
//!
//! Every key is optional. Relative `cmf` and `output` paths are resolved
//! against the directory holding the run file.

use std::path::{Path, PathBuf};

use kelvin_color::{Calibration, PipelineConfig, SweepMode, SweepParams};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{IoError, IoResult};

/// Contents of a run file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Sweep input unit.
    pub mode: SweepMode,
    /// First input value.
    pub min: Option<f64>,
    /// Last input value.
    pub max: Option<f64>,
    /// Increment.
    pub step: Option<f64>,
    /// Calibration reference point.
    pub reference: Option<Calibration>,
    /// Matrix, luminous efficacy and normalization switches.
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
    /// Evaluate sweep points in parallel.
    pub parallel: bool,
    /// CMF table; the built-in analytic table is used when absent.
    pub cmf: Option<PathBuf>,
    /// Output CSV; standard output when absent.
    pub output: Option<PathBuf>,
}

impl RunConfig {
    /// Parses a run file from YAML text. Paths are left as written.
    pub fn from_yaml_str(yaml: &str) -> IoResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> IoResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Sweep range, failing when a bound is missing or invalid.
    pub fn sweep_params(&self) -> IoResult<SweepParams> {
        let require = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| IoError::MissingData(format!("sweep {name} is not set")))
        };
        let params = SweepParams::new(
            self.mode,
            require(self.min, "min")?,
            require(self.max, "max")?,
            require(self.step, "step")?,
        );
        params.validate()?;
        Ok(params)
    }

    /// Pipeline switches with the calibration reference applied.
    pub fn pipeline_config(&self) -> PipelineConfig {
        self.pipeline.calibration(self.reference)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.cmf, &mut self.output].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Reads a run file, resolving relative paths against its directory.
pub fn read_run_config<P: AsRef<Path>>(path: P) -> IoResult<RunConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let mut config = RunConfig::from_yaml_str(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base);

    debug!(path = %path.display(), ?config, "read run file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kelvin_color::ColorError;
    use kelvin_primaries::MatrixVariant;

    const FULL: &str = "\
mode: voltage
min: 1.0
max: 6.3
step: 0.1
reference:
  reference: 6.3
  luminance: 1200000.0
matrix: srgb
luminous_efficacy: false
normalize: false
parallel: true
cmf: tables/cie1931.csv
output: /tmp/out.csv
";

    #[test]
    fn test_parse_full() {
        let config = RunConfig::from_yaml_str(FULL).unwrap();
        assert_eq!(config.mode, SweepMode::Voltage);
        assert_eq!(config.min, Some(1.0));
        assert_eq!(config.reference, Some(Calibration::new(6.3, 1.2e6)));
        assert_eq!(config.pipeline.matrix, MatrixVariant::Srgb);
        assert!(!config.pipeline.luminous_efficacy);
        assert!(config.parallel);

        let params = config.sweep_params().unwrap();
        assert_eq!(params.count(), 54);

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.calibration, config.reference);
        pipeline.validate().unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_yaml_str("min: 1000\nmax: 2000\nstep: 500\n").unwrap();
        assert_eq!(config.mode, SweepMode::Temperature);
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert!(config.cmf.is_none());
        assert_eq!(config.sweep_params().unwrap().count(), 3);
    }

    #[test]
    fn test_missing_bounds() {
        let config = RunConfig::from_yaml_str("min: 1000\nstep: 10\n").unwrap();
        assert!(matches!(config.sweep_params(), Err(IoError::MissingData(_))));

        let config = RunConfig::from_yaml_str("min: 2000\nmax: 1000\nstep: 10\n").unwrap();
        assert!(matches!(
            config.sweep_params(),
            Err(IoError::Color(ColorError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            RunConfig::from_yaml_str("mode: sideways\n"),
            Err(IoError::Yaml(_))
        ));
    }

    #[test]
    fn test_read_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, FULL).unwrap();

        let config = read_run_config(&path).unwrap();
        assert_eq!(config.cmf, Some(dir.path().join("tables/cie1931.csv")));
        assert_eq!(config.output, Some(PathBuf::from("/tmp/out.csv")));
    }

    #[test]
    fn test_not_found() {
        assert!(matches!(
            read_run_config("/nonexistent/run.yaml"),
            Err(IoError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = RunConfig::from_yaml_str(FULL).unwrap();
        let again = RunConfig::from_yaml_str(&config.to_yaml_string().unwrap()).unwrap();
        assert_eq!(config, again);
    }
}
