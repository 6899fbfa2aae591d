//! Sweep results as CSV.
//!
//! Layout:
//!
//! ```text
//! Reference Temperature (K):,2856,Reference Luminance (lm sr^-1 m^-2):,1000   <- calibrated runs only
//! [Voltage (V),]Temperature (K),[X,Y,Z,]Red,Green,Blue
//! ...one row per sample...
//! ```
//!
//! The voltage column appears in voltage mode. The XYZ columns can be left
//! out, except for calibrated runs where they carry the absolute luminance.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use kelvin_color::{SweepMode, SweepReport};
use tracing::debug;

use crate::IoResult;

/// Configurable sweep CSV writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepWriter {
    xyz: bool,
}

impl Default for SweepWriter {
    fn default() -> Self {
        Self { xyz: true }
    }
}

impl SweepWriter {
    /// Writer that includes every column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes or omits the X, Y, Z columns. Ignored for calibrated runs.
    pub fn xyz(mut self, enabled: bool) -> Self {
        self.xyz = enabled;
        self
    }

    /// Column names for `report`.
    pub fn header(&self, report: &SweepReport) -> Vec<&'static str> {
        let mut header = Vec::with_capacity(8);
        if report.mode == SweepMode::Voltage {
            header.push("Voltage (V)");
        }
        header.push("Temperature (K)");
        if self.with_xyz(report) {
            header.extend(["X", "Y", "Z"]);
        }
        header.extend(["Red", "Green", "Blue"]);
        header
    }

    fn with_xyz(&self, report: &SweepReport) -> bool {
        self.xyz || report.calibration.is_some()
    }

    /// Writes `report` to a file, replacing it.
    pub fn write<P: AsRef<Path>>(&self, path: P, report: &SweepReport) -> IoResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), samples = report.samples.len(), "write_sweep");
        self.write_to(File::create(path)?, report)
    }

    /// Writes `report` to any byte sink.
    pub fn write_to<W: Write>(&self, writer: W, report: &SweepReport) -> IoResult<()> {
        let mut out = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        if let Some(cal) = &report.calibration {
            let label = match report.mode {
                SweepMode::Temperature => "Reference Temperature (K):",
                SweepMode::Voltage => "Reference Voltage (V):",
            };
            out.write_record([
                label.to_string(),
                cal.reference.reference.to_string(),
                "Reference Luminance (lm sr^-1 m^-2):".to_string(),
                cal.reference.luminance.to_string(),
            ])?;
        }

        out.write_record(self.header(report))?;

        let with_xyz = self.with_xyz(report);
        let mut row: Vec<String> = Vec::with_capacity(8);
        for sample in &report.samples {
            row.clear();
            if report.mode == SweepMode::Voltage {
                row.push(sample.input_value.to_string());
            }
            row.push(sample.temperature_k.to_string());
            if with_xyz {
                row.extend([sample.xyz.x, sample.xyz.y, sample.xyz.z].map(|v| v.to_string()));
            }
            row.extend(sample.rgb.to_array().map(|v| v.to_string()));
            out.write_record(&row)?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Writes a sweep with every column to a file.
pub fn write_sweep<P: AsRef<Path>>(path: P, report: &SweepReport) -> IoResult<()> {
    SweepWriter::new().write(path, report)
}

/// Writes a sweep with every column to any byte sink.
pub fn write_sweep_to<W: Write>(writer: W, report: &SweepReport) -> IoResult<()> {
    SweepWriter::new().write_to(writer, report)
}
