//! Native AVIF encoding via libvips-rs.
//!
//! - [`VipsEncoder`]: implements [`AvifEncoder`](crate::processing::AvifEncoder) with `heifsave`.
//! - `runtime`: owns the `VipsApp` guard that keeps libvips initialized.

mod encoder;
mod runtime;

pub use encoder::VipsEncoder;
