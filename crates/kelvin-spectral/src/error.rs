//! Error types for spectral operations.

use kelvin_math::IntegrateError;
use thiserror::Error;

/// Spectral computation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectralError {
    /// A color-matching table needs at least three records.
    #[error("color-matching table needs at least 3 records, got {0}")]
    TooFewRecords(usize),

    /// Numerical integration failed.
    #[error("integration failed: {0}")]
    Integration(#[from] IntegrateError),

    /// Table generation parameters are unusable.
    #[error("invalid table range: {0}")]
    InvalidRange(String),
}

/// Result type for spectral operations.
pub type SpectralResult<T> = Result<T, SpectralError>;
