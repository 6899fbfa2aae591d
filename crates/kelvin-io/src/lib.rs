//! # kelvin-io
//!
//! File formats around the black-body pipeline.
//!
//! - [`read_cmf`]: CIE color matching function tables (headerless CSV)
//! - [`write_sweep`]: sweep results as CSV
//! - [`read_run_config`]: YAML run files
//!
//! # Example
//!
//! ```rust
//! use kelvin_color::{PipelineConfig, SweepDriver, SweepMode, SweepParams};
//!
//! let csv = "500,1,0,0\n600,0,1,0\n700,0,0,1\n";
//! let table = kelvin_io::read_cmf_from(csv.as_bytes()).unwrap();
//!
//! let params = SweepParams::new(SweepMode::Temperature, 4000.0, 6000.0, 1000.0);
//! let report = SweepDriver::new(&table, PipelineConfig::new()).run(&params).unwrap();
//!
//! let mut out = Vec::new();
//! kelvin_io::write_sweep_to(&mut out, &report).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);
//! ```

#![warn(missing_docs)]

mod error;
pub mod cmf;
pub mod config;
pub mod writer;

pub use cmf::{read_cmf, read_cmf_from};
pub use config::{RunConfig, read_run_config};
pub use error::{IoError, IoResult};
pub use writer::{SweepWriter, write_sweep, write_sweep_to};
