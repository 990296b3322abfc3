//! Core types for conversion settings and results.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::{ConverterError, DEFAULT_PATTERN};

/// Encoder settings shared by single and batch conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvifSettings {
    /// Compression quality (1-100)
    pub quality: u8,
    /// Encoding speed (1-10); higher is faster and larger
    pub speed: u8,
}

impl Default for AvifSettings {
    fn default() -> Self {
        Self { quality: 80, speed: 6 }
    }
}

/// How the batch orchestrator bounds in-flight conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheduling {
    /// Semaphore-gated: a new conversion starts as soon as a slot frees
    #[default]
    Pooled,
    /// Fixed-size chunks, each fully awaited before the next starts
    Chunked,
}

impl FromStr for Scheduling {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pooled" => Ok(Self::Pooled),
            "chunked" => Ok(Self::Chunked),
            other => Err(ConverterError::validation(format!(
                "Unknown scheduling mode: {other} (expected pooled or chunked)"
            ))),
        }
    }
}

/// Settings for a directory batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    pub avif: AvifSettings,
    /// Glob relative to the input directory
    pub pattern: String,
    /// Maximum number of conversions in flight
    pub concurrency: usize,
    pub scheduling: Scheduling,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            avif: AvifSettings::default(),
            pattern: DEFAULT_PATTERN.to_string(),
            concurrency: 4,
            scheduling: Scheduling::default(),
        }
    }
}

/// Chroma subsampling handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    #[serde(rename = "4:4:4")]
    Yuv444,
    #[serde(rename = "4:2:0")]
    Yuv420,
}

impl ChromaSubsampling {
    /// Full chroma resolution for sources with transparency, 4:2:0 otherwise.
    pub fn for_source(metadata: &ImageMetadata) -> Self {
        if metadata.has_alpha {
            Self::Yuv444
        } else {
            Self::Yuv420
        }
    }
}

impl fmt::Display for ChromaSubsampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yuv444 => f.write_str("4:4:4"),
            Self::Yuv420 => f.write_str("4:2:0"),
        }
    }
}

/// Everything the encoder needs for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub quality: u8,
    pub speed: u8,
    pub chroma: ChromaSubsampling,
}

/// Source image properties read before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Number of channels, alpha included
    pub bands: u32,
    pub has_alpha: bool,
    /// Lowercase source extension
    pub format: Option<String>,
}

/// Result of converting one image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Original file size in bytes
    pub original_size: u64,
    /// AVIF file size in bytes
    pub converted_size: u64,
    /// Bytes saved (negative if the file grew)
    pub saved_bytes: i64,
    /// Percentage saved, rounded to two decimals and never negative
    pub compression_ratio: f64,
    pub chroma: ChromaSubsampling,
    pub metadata: ImageMetadata,
}

impl ConversionResult {
    pub fn new(
        input_path: PathBuf,
        output_path: PathBuf,
        original_size: u64,
        converted_size: u64,
        chroma: ChromaSubsampling,
        metadata: ImageMetadata,
    ) -> Self {
        Self {
            input_path,
            output_path,
            original_size,
            converted_size,
            saved_bytes: original_size as i64 - converted_size as i64,
            compression_ratio: compression_ratio(original_size, converted_size),
            chroma,
            metadata,
        }
    }
}

/// `(original - converted) / original` as a percentage rounded to two decimals.
///
/// Returns 0.0 for an empty source and clamps growth to 0.0.
pub fn compression_ratio(original: u64, converted: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let saved = original as f64 - converted as f64;
    let ratio = saved / original as f64 * 100.0;
    ((ratio * 100.0).round() / 100.0).max(0.0)
}

/// A file that failed to convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub file: PathBuf,
    pub error: String,
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub total_original_size: u64,
    pub total_converted_size: u64,
    /// Failures in scan order
    pub errors: Vec<FileError>,
}

impl BatchResult {
    /// Starts an empty accumulator for `total` files.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, result: &ConversionResult) {
        self.success += 1;
        self.total_original_size += result.original_size;
        self.total_converted_size += result.converted_size;
    }

    pub fn record_failure(&mut self, file: PathBuf, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(FileError {
            file,
            error: error.into(),
        });
    }

    /// Overall ratio across successful conversions.
    pub fn compression_ratio(&self) -> f64 {
        compression_ratio(self.total_original_size, self.total_converted_size)
    }

    /// Whether every file has been accounted for.
    pub fn is_complete(&self) -> bool {
        self.success + self.failed == self.total
    }
}
