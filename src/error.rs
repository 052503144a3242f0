//! # Error Types
//!
//! This module defines error types used throughout the rojo library.

use thiserror::Error;

/// Main error type for rojo operations
#[derive(Debug, Error)]
pub enum RojoError {
    /// A numeric field is outside its protocol-defined bounds
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    ValueOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Required input (dimensions, pixel data, settings JSON) is missing or inconsistent
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A string-keyed setting did not match any known value
    #[error("Unknown value '{key}' for setting '{setting}'")]
    UnknownConfigurationKey { setting: &'static str, key: String },

    /// Feature intentionally not implemented
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Image decoding or resampling error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RojoError {
    pub(crate) fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        RojoError::ValueOutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// Check `value` against an inclusive range, naming the field on failure.
    pub(crate) fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::out_of_range(field, value, min, max))
        }
    }
}

/// Result alias used by every fallible rojo operation
pub type Result<T> = std::result::Result<T, RojoError>;
