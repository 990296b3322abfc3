//! The boundary to the AVIF codec.
//!
//! Both operations are blocking; callers run them on tokio's blocking pool.

use std::path::Path;
use std::sync::Arc;

use crate::core::{EncodeOptions, ImageMetadata};
use crate::utils::{ConverterError, ConverterResult};

pub trait AvifEncoder: Send + Sync + 'static {
    /// Reads the source header (dimensions, channels, alpha).
    fn inspect(&self, input: &Path) -> ConverterResult<ImageMetadata>;

    /// Encodes `input` to `output` as AVIF. The output's parent directory exists.
    fn encode(&self, input: &Path, output: &Path, options: &EncodeOptions) -> ConverterResult<()>;
}

/// Shared handle used by the converter and batch tasks.
pub type SharedEncoder = Arc<dyn AvifEncoder>;

/// Encoder used when the crate is built without the `vips` feature.
pub struct UnavailableEncoder;

impl AvifEncoder for UnavailableEncoder {
    fn inspect(&self, input: &Path) -> ConverterResult<ImageMetadata> {
        Err(unavailable(input))
    }

    fn encode(&self, input: &Path, _output: &Path, _options: &EncodeOptions) -> ConverterResult<()> {
        Err(unavailable(input))
    }
}

fn unavailable(input: &Path) -> ConverterError {
    ConverterError::encode(format!(
        "cannot encode {}: built without libvips support (enable the `vips` feature)",
        input.display()
    ))
}

/// Builds the encoder for this build: libvips when available.
pub fn default_encoder() -> ConverterResult<SharedEncoder> {
    #[cfg(feature = "vips")]
    {
        let encoder = super::libvips::VipsEncoder::new()?;
        Ok(Arc::new(encoder))
    }

    #[cfg(not(feature = "vips"))]
    {
        tracing::warn!("libvips support not compiled in; conversions will fail");
        Ok(Arc::new(UnavailableEncoder))
    }
}
