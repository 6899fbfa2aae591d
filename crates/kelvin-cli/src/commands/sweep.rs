//! Sweep command
//!
//! Merges the optional YAML run file with command-line flags, runs the sweep
//! and writes the CSV table.

use crate::SweepArgs;
use anyhow::{Context, Result};
use kelvin_color::{Calibration, SweepDriver};
use kelvin_io::{RunConfig, SweepWriter};
use tracing::{debug, info};

pub fn run(args: SweepArgs) -> Result<()> {
    let run = resolve(&args)?;
    debug!(?run, "Resolved run");

    let params = run.sweep_params().context("Invalid sweep range")?;
    let table = super::load_table(run.cmf.as_deref())?;

    let report = SweepDriver::new(&table, run.pipeline_config())
        .parallel(run.parallel)
        .run(&params)
        .context("Sweep failed")?;

    if let Some(cal) = &report.calibration {
        info!(
            reference = cal.reference.reference,
            temperature_k = cal.temperature_k,
            coefficient = cal.coefficient,
            "Calibrated"
        );
    }

    let writer = SweepWriter::new().xyz(!args.no_xyz);
    match &run.output {
        Some(path) => {
            writer
                .write(path, &report)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!(path = %path.display(), rows = report.samples.len(), "Wrote sweep");
        }
        None => writer
            .write_to(std::io::stdout().lock(), &report)
            .context("Failed to write to stdout")?,
    }

    Ok(())
}

/// Run file values with command-line flags on top
fn resolve(args: &SweepArgs) -> Result<RunConfig> {
    let mut run = match &args.config {
        Some(path) => kelvin_io::read_run_config(path)
            .with_context(|| format!("Failed to read run file: {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(mode) = args.mode {
        run.mode = mode;
    }
    run.min = args.min.or(run.min);
    run.max = args.max.or(run.max);
    run.step = args.step.or(run.step);
    if let (Some(reference), Some(luminance)) = (args.reference, args.luminance) {
        run.reference = Some(Calibration::new(reference, luminance));
    }
    run.pipeline = super::apply_pipeline_args(run.pipeline, &args.pipeline);
    run.parallel |= args.parallel;
    if args.pipeline.cmf.is_some() {
        run.cmf = args.pipeline.cmf.clone();
    }
    if args.output.is_some() {
        run.output = args.output.clone();
    }

    Ok(run)
}
