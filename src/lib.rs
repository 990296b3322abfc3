// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{AvifSettings, BatchResult, BatchSettings, ConversionResult, ConverterConfig, Scheduling};
pub use crate::processing::{AvifEncoder, BatchProcessor, Converter, DirectoryScanner, default_encoder};
pub use crate::utils::{ConverterError, ConverterResult, is_format_supported};
