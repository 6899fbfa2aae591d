//! Error types for color operations.
//!
//! Covers invalid run parameters, conflicting pipeline switches and
//! failures bubbling up from spectral integration.

use kelvin_spectral::SpectralError;
use thiserror::Error;

/// Color operation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// A run parameter is out of range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Pipeline switches that cannot be combined.
    #[error("invalid pipeline: {0}")]
    InvalidPipeline(String),

    /// Matrix operation failed (singular, numerical instability).
    #[error("matrix error: {0}")]
    MatrixError(String),

    /// Spectral integration failed.
    #[error(transparent)]
    Spectral(#[from] SpectralError),
}

impl ColorError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
