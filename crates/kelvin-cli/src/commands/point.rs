//! Point command
//!
//! Prints the color of a single temperature or filament voltage.

use crate::PointArgs;
use anyhow::{Context, Result, ensure};
use kelvin_color::{PipelineConfig, SweepDriver, SweepMode, SweepSample};
use kelvin_spectral::peak_wavelength;
use tracing::trace;

pub fn run(args: PointArgs) -> Result<()> {
    trace!(value = args.value, voltage = args.voltage, "point");
    ensure!(args.value > 0.0, "Value must be positive, got {}", args.value);
    let table = super::load_table(args.pipeline.cmf.as_deref())?;
    let config = super::apply_pipeline_args(PipelineConfig::new(), &args.pipeline);

    let mode = if args.voltage {
        SweepMode::Voltage
    } else {
        SweepMode::Temperature
    };
    let sample = SweepDriver::new(&table, config)
        .sample(mode, args.value)
        .context("Failed to evaluate point")?;

    println!("{}", format_sample(mode, &sample));
    Ok(())
}

fn format_sample(mode: SweepMode, s: &SweepSample) -> String {
    let mut out = Vec::new();
    if mode == SweepMode::Voltage {
        out.push(format!("Voltage:       {} V", s.input_value));
    }
    out.push(format!("Temperature:   {:.1} K", s.temperature_k));
    out.push(format!(
        "Peak:          {:.1} nm",
        peak_wavelength(s.temperature_k) * 1e9
    ));
    out.push(format!("XYZ:           {:.6e} {:.6e} {:.6e}", s.xyz.x, s.xyz.y, s.xyz.z));
    if let Some((x, y)) = s.xyz.chromaticity() {
        out.push(format!("Chromaticity:  x={x:.4} y={y:.4}"));
    }
    let gamut = if s.rgb.is_out_of_gamut() { "  (out of gamut)" } else { "" };
    out.push(format!(
        "RGB:           {:.6} {:.6} {:.6}{gamut}",
        s.rgb.r, s.rgb.g, s.rgb.b
    ));
    out.join("\n")
}
