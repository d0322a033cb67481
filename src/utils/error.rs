//! Error types for the image converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for conversion settings and inputs.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// Quality outside of 1..=100
    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    Quality(u32),
    /// Aspect ratio notation that isn't `W-H` with positive components
    #[error("Invalid aspect ratio '{0}', expected W-H with positive integers (e.g. 16-9)")]
    Ratio(String),
    /// Output format outside of the supported set
    #[error("Unsupported output format: {0}")]
    Format(String),
}

/// Main error type for the converter.
///
/// Per-unit failures are flattened to strings inside the batch report;
/// this type is what library calls return.
#[derive(Error, Debug, Serialize)]
pub enum ConverterError {
    /// Settings or input validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Batch orchestration failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Input image could not be read or decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image could not be encoded into the target format
    #[error("Encode error: {0}")]
    Encode(String),

    /// Output folder can't be opened (nothing converted since last clear)
    #[error("Output unavailable: {0}")]
    OutputUnavailable(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

// Helper methods for error creation
impl ConverterError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn output_unavailable<T: Into<String>>(msg: T) -> Self {
        Self::OutputUnavailable(msg.into())
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn ratio(notation: impl Into<String>) -> Self {
        Self::Ratio(notation.into())
    }

    pub fn format(name: impl Into<String>) -> Self {
        Self::Format(name.into())
    }
}

// Convert std::io::Error to ConverterError
impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}
