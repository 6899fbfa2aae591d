//! CLI command implementations

pub mod filament;
pub mod point;
pub mod sweep;

use crate::PipelineArgs;
use anyhow::{Context, Result};
use kelvin_color::PipelineConfig;
use kelvin_spectral::CmfTable;
use std::path::Path;
use tracing::debug;

/// Range of the built-in CMF table (nm).
const ANALYTIC_RANGE: (f64, f64, f64) = (360.0, 830.0, 1.0);

/// Load the CMF table, falling back to the analytic CIE 1931 fit
pub fn load_table(path: Option<&Path>) -> Result<CmfTable> {
    match path {
        Some(path) => kelvin_io::read_cmf(path)
            .with_context(|| format!("Failed to load CMF table: {}", path.display())),
        None => {
            let (start, end, step) = ANALYTIC_RANGE;
            debug!(start, end, step, "Using built-in CIE 1931 table");
            CmfTable::analytic_cie1931(start, end, step).context("Failed to build CMF table")
        }
    }
}

/// Overlay command-line switches on a base configuration
pub fn apply_pipeline_args(base: PipelineConfig, args: &PipelineArgs) -> PipelineConfig {
    let mut config = base;
    if let Some(matrix) = args.matrix {
        config = config.matrix(matrix);
    }
    if args.no_efficacy {
        config = config.luminous_efficacy(false);
    }
    if args.normalize {
        config = config.normalize(true);
    }
    config
}
