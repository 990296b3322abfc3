//! Core types and configuration.
//!
//! - [`AvifSettings`] / [`BatchSettings`]: what to encode and how to schedule it
//! - [`ConversionResult`] / [`BatchResult`]: per-file and aggregated outcomes
//! - [`ConverterConfig`]: defaults, config file and CLI flags merged into one struct

mod config;
mod types;

pub use config::{ConfigOverrides, ConverterConfig, DEFAULT_CONFIG_FILE};
pub use types::{
    AvifSettings, BatchResult, BatchSettings, ChromaSubsampling, ConversionResult, EncodeOptions,
    FileError, ImageMetadata, Scheduling, compression_ratio,
};
