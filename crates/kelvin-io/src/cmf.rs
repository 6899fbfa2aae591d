//! Color matching function tables from CSV.
//!
//! The expected layout is the one CIE publishes: no header, one record per
//! line, `wavelength_nm, x_bar, y_bar, z_bar`.
//!
//! Malformed data is repaired rather than rejected:
//!
//! - rows without exactly four fields are dropped with a warning
//! - fields that do not parse as a finite number become `0.0`
//!
//! Only a table left with fewer than three records is an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use kelvin_spectral::{CmfRecord, CmfTable};
use tracing::{debug, warn};

use crate::IoResult;

/// Spacing deviation (nm) tolerated before warning about a non-uniform grid.
const SPACING_TOLERANCE_NM: f64 = 1e-6;

/// Reads a CMF table from a CSV file.
pub fn read_cmf<P: AsRef<Path>>(path: P) -> IoResult<CmfTable> {
    let path = path.as_ref();
    debug!(path = %path.display(), "read_cmf");
    read_cmf_from(File::open(path)?)
}

/// Reads a CMF table from any CSV source.
pub fn read_cmf_from<R: Read>(reader: R) -> IoResult<CmfTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        if row.len() != 4 {
            warn!(row = row_no + 1, fields = row.len(), ?row, "dropping CMF row");
            dropped += 1;
            continue;
        }

        let mut fields = [0.0; 4];
        for (slot, field) in fields.iter_mut().zip(row.iter()) {
            *slot = parse_field(field);
        }
        records.push(CmfRecord::from_array(fields));
    }

    let table = CmfTable::new(records)?;
    if !table.is_uniform(SPACING_TOLERANCE_NM) {
        warn!(
            spacing = table.spacing(),
            "CMF wavelengths are not evenly spaced; integration assumes the first interval"
        );
    }

    let (first, last) = table.wavelength_range();
    debug!(records = table.len(), dropped, first, last, "loaded CMF table");
    Ok(table)
}

/// Parses a numeric field, mapping anything unparsable or non-finite to zero.
fn parse_field(field: &str) -> f64 {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
