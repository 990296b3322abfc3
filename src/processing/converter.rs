//! Single-file conversion.

use std::path::Path;
use tracing::debug;

use crate::core::{AvifSettings, ChromaSubsampling, ConversionResult, EncodeOptions};
use crate::processing::encoder::SharedEncoder;
use crate::utils::{
    ConverterError, ConverterResult, ensure_parent_dir, get_file_size, validate_input_file,
    validate_settings,
};

/// Converts one image at a time through a shared encoder. Cheap to clone.
#[derive(Clone)]
pub struct Converter {
    encoder: SharedEncoder,
}

impl Converter {
    pub fn new(encoder: SharedEncoder) -> Self {
        Self { encoder }
    }

    /// Converts `input` to AVIF at `output`.
    ///
    /// Sources with an alpha channel are encoded at 4:4:4, everything else at
    /// 4:2:0. Encoder failures are returned unchanged.
    pub async fn convert(
        &self,
        input: &Path,
        output: &Path,
        settings: AvifSettings,
    ) -> ConverterResult<ConversionResult> {
        validate_settings(&settings)?;
        validate_input_file(input).await?;
        ensure_parent_dir(output).await?;

        let original_size = get_file_size(input).await?;

        let encoder = self.encoder.clone();
        let input_buf = input.to_path_buf();
        let output_buf = output.to_path_buf();
        let (metadata, chroma) = tokio::task::spawn_blocking(move || {
            let metadata = encoder.inspect(&input_buf)?;
            let chroma = ChromaSubsampling::for_source(&metadata);
            let options = EncodeOptions {
                quality: settings.quality,
                speed: settings.speed,
                chroma,
            };
            encoder.encode(&input_buf, &output_buf, &options)?;
            Ok::<_, ConverterError>((metadata, chroma))
        })
        .await
        .map_err(|e| ConverterError::encode(format!("Task panicked: {e}")))??;

        let converted_size = get_file_size(output).await?;
        let result = ConversionResult::new(
            input.to_path_buf(),
            output.to_path_buf(),
            original_size,
            converted_size,
            chroma,
            metadata,
        );

        debug!(
            "'{}' → {} ({}×{}, {}, {} → {} bytes, {:.2}%)",
            display_name(input),
            display_name(output),
            result.metadata.width,
            result.metadata.height,
            chroma,
            original_size,
            converted_size,
            result.compression_ratio
        );

        Ok(result)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
