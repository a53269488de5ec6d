//! Error types for sweep processing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for sweep processing operations.
pub type SweepResult<T> = Result<T, SweepError>;

/// Errors that can occur while building or corrupting point clouds.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A parameter value is outside its documented range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A radar channel name is not one of the recognized sensors.
    #[error("unknown radar channel: {0}")]
    UnknownChannel(String),

    /// A region name is not one of front, back, left, or right.
    #[error("unknown region: {0}; expected front, back, left, or right")]
    UnknownRegion(String),

    /// A sample does not reference the requested sensor.
    #[error("sample has no sweep for sensor: {0}")]
    MissingSample(String),

    /// Point matrices with different channel counts cannot be combined.
    #[error("dimension mismatch: expected {expected} rows, got {actual}")]
    DimensionMismatch {
        /// Expected number of rows.
        expected: usize,
        /// Actual number of rows.
        actual: usize,
    },

    /// A raw point file does not contain a whole number of records.
    #[error("malformed point file {path}: {reason}")]
    MalformedPointFile {
        /// Path of the offending file.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// I/O error while reading a raw point file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Creates a missing sample error.
    #[must_use]
    pub fn missing_sample(sensor: impl Into<String>) -> Self {
        Self::MissingSample(sensor.into())
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub const fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates a malformed point file error.
    #[must_use]
    pub fn malformed_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedPointFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
