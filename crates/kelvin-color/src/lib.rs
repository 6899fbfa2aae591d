//! # kelvin-color
//!
//! Turns black-body tristimulus values into RGB and drives sweeps over a
//! temperature or voltage range.
//!
//! # Architecture
//!
//! ```text
//!                 kelvin-color
//!                      |
//!      +---------------+---------------+
//!      |               |               |
//! kelvin-spectral  kelvin-primaries    |
//!      |               |               |
//!      +-------+-------+               |
//!              |                       |
//!         kelvin-math -----------------+
//! ```
//!
//! The historic script variants differed in their matrix, in luminous
//! efficacy scaling, and in whether they calibrated or normalized. Here
//! those are switches on one [`PipelineConfig`]:
//!
//! | Switch | Default | Effect |
//! |--------|---------|--------|
//! | `matrix` | `cie-rgb` | RGB -> XYZ matrix that gets inverted |
//! | `luminous_efficacy` | on | XYZ scaled by 683 lm/W |
//! | `normalize` | off | RGB divided by its largest absolute component |
//! | `calibration` | none | XYZ scaled to match a reference luminance |
//!
//! Normalization and calibration are mutually exclusive.
//!
//! # Quick Start
//!
//! ```rust
//! use kelvin_color::{PipelineConfig, SweepDriver, SweepMode, SweepParams};
//! use kelvin_spectral::CmfTable;
//!
//! let table = CmfTable::analytic_cie1931(380.0, 780.0, 5.0).unwrap();
//! let config = PipelineConfig::new().normalize(true);
//! let params = SweepParams::new(SweepMode::Temperature, 1000.0, 1200.0, 100.0);
//!
//! let report = SweepDriver::new(&table, config).run(&params).unwrap();
//! assert_eq!(report.samples.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod pipeline;
mod rgb;
pub mod calibration;
pub mod sweep;

pub use calibration::{Calibration, ResolvedCalibration};
pub use error::{ColorError, ColorResult};
pub use pipeline::{ColorPipeline, PipelineConfig, TransformOp, xyz_to_rgb};
pub use rgb::RgbColor;
pub use sweep::{MAX_POINTS, SweepDriver, SweepMode, SweepParams, SweepReport, SweepSample};

// Re-export sub-crates for convenience
pub use kelvin_math as math;
pub use kelvin_primaries as primaries;
pub use kelvin_spectral as spectral;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{
        Calibration, ColorPipeline, PipelineConfig, RgbColor, SweepDriver, SweepMode,
        SweepParams, SweepSample,
    };

    pub use kelvin_primaries::MatrixVariant;
    pub use kelvin_spectral::{CmfTable, ColorMatcher, Filament, XyzColor};
}
