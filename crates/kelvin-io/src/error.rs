//! Error types for I/O operations.

use std::io;
use std::path::PathBuf;

use kelvin_color::ColorError;
use kelvin_spectral::SpectralError;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed CSV stream.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed YAML run file.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Run file does not exist.
    #[error("run file not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A value required by the run is missing.
    #[error("missing data: {0}")]
    MissingData(String),

    /// The loaded table is unusable.
    #[error(transparent)]
    Spectral(#[from] SpectralError),

    /// Run parameters were rejected.
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
