//! Command handlers invoked by the CLI.
//!
//! Each handler receives the resolved [`ConverterConfig`](crate::core::ConverterConfig)
//! explicitly and returns a value; rendering to text is kept separate so
//! `--json` can serialize the same value instead.
//! - [`convert_image`]: one file
//! - [`batch_convert`]: a directory tree
//! - [`image_info`]: source image properties
//! - [`render_formats`]: the supported format listing

mod batch;
mod convert;
mod formats;
mod info;

pub use batch::{batch_convert, render_batch_summary};
pub use convert::{convert_image, render_conversion};
pub use formats::render_formats;
pub use info::{ImageInfo, image_info, render_info};
