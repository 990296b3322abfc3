use std::path::Path;
use anyhow::{Context, Result};
use tracing::info;

use crate::core::{ConversionResult, ConverterConfig};
use crate::processing::{Converter, SharedEncoder};

/// Converts a single image with the configured quality and speed.
pub async fn convert_image(
    config: &ConverterConfig,
    encoder: SharedEncoder,
    input: &Path,
    output: &Path,
) -> Result<ConversionResult> {
    info!("Converting {} → {}", input.display(), output.display());

    let converter = Converter::new(encoder);
    let result = converter
        .convert(input, output, config.avif_settings())
        .await
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    Ok(result)
}

/// Plain-text report printed after a successful `convert`.
pub fn render_conversion(result: &ConversionResult) -> String {
    format!(
        "Converted {} → {}\n  Original size:  {} bytes\n  Converted size: {} bytes\n  Compression:    {:.2}% (chroma {})\n",
        result.input_path.display(),
        result.output_path.display(),
        result.original_size,
        result.converted_size,
        result.compression_ratio,
        result.chroma,
    )
}
