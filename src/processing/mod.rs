//! Scanning, conversion and batch orchestration.
//!
//! - [`DirectoryScanner`]: glob expansion under an input root
//! - [`Converter`]: one file through the [`AvifEncoder`]
//! - [`BatchProcessor`]: bounded-concurrency conversion of a whole tree

mod batch;
mod converter;
mod encoder;
#[cfg(feature = "vips")]
mod libvips;
mod scanner;
#[cfg(test)]
pub(crate) mod testing;

pub use batch::BatchProcessor;
pub use converter::Converter;
pub use encoder::{AvifEncoder, SharedEncoder, UnavailableEncoder, default_encoder};
#[cfg(feature = "vips")]
pub use self::libvips::VipsEncoder;
pub use scanner::{DirectoryScanner, scan_directory};
