//! Error types for the converter.
//!
//! A single flat enum built with `thiserror`; every library operation returns
//! [`ConverterResult`]. The binary wraps these in `anyhow` at the top level.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Main error type for the converter library.
#[derive(Error, Debug, Serialize)]
pub enum ConverterError {
    /// Input file or directory is absent or not accessible
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Filesystem create/read/write failure
    #[error("IO error: {0}")]
    Io(String),

    /// The AVIF encoder rejected the image; the codec message is kept verbatim
    #[error("Encode error: {0}")]
    Encode(String),

    /// Settings outside their allowed range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Glob pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

impl ConverterError {
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput(path.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::Io(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn pattern<T: Into<String>>(msg: T) -> Self {
        Self::Pattern(msg.into())
    }
}

impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<globset::Error> for ConverterError {
    fn from(err: globset::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
