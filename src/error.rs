//! Error types for statistics accumulation and transform generation.

use std::fmt;

/// Error type for transform configuration, generation and persistence.
#[derive(Debug)]
pub enum TransformError {
    /// Invalid hyperparameter or frozen-parameter value.
    InvalidParameter(String),
    /// A freeze was requested with fewer observed values than bins.
    InsufficientData {
        requested_bins: usize,
        observed_values: usize,
    },
    /// Serialization or deserialization error.
    SerializationError(String),
    /// I/O error during file operations.
    IoError(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            TransformError::InsufficientData {
                requested_bins,
                observed_values,
            } => {
                write!(
                    f,
                    "Insufficient data: requested {} bins, but only observed {} values",
                    requested_bins, observed_values
                )
            }
            TransformError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            TransformError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<std::io::Error> for TransformError {
    fn from(err: std::io::Error) -> Self {
        TransformError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for TransformError {
    fn from(err: bincode::Error) -> Self {
        TransformError::SerializationError(err.to_string())
    }
}
