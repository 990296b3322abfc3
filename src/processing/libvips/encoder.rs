//! AVIF encoding through libvips' HEIF saver (AV1 compression).

use std::path::Path;
use tracing::debug;

use libvips::ops::{self, ForeignHeifCompression, ForeignKeep, ForeignSubsample};
use libvips::VipsImage;

use crate::core::{ChromaSubsampling, EncodeOptions, ImageMetadata};
use crate::processing::encoder::AvifEncoder;
use crate::utils::{ConverterError, ConverterResult, extension_of};

use super::runtime::VipsRuntime;

/// Encoder backed by the process-wide libvips runtime.
pub struct VipsEncoder {
    _runtime: VipsRuntime,
}

impl VipsEncoder {
    pub fn new() -> ConverterResult<Self> {
        Ok(Self {
            _runtime: VipsRuntime::init()?,
        })
    }
}

impl AvifEncoder for VipsEncoder {
    fn inspect(&self, input: &Path) -> ConverterResult<ImageMetadata> {
        let image = load(input)?;
        let bands = image.get_bands().max(0) as u32;

        Ok(ImageMetadata {
            width: image.get_width().max(0) as u32,
            height: image.get_height().max(0) as u32,
            bands,
            has_alpha: bands_have_alpha(bands),
            format: extension_of(input),
        })
    }

    fn encode(&self, input: &Path, output: &Path, options: &EncodeOptions) -> ConverterResult<()> {
        let image = load(input)?;
        let output_str = utf8(output)?;

        let opts = ops::HeifsaveOptions {
            q: i32::from(options.quality),
            lossless: options.quality == 100,
            compression: ForeignHeifCompression::Av1,
            effort: effort_for_speed(options.speed),
            subsample_mode: subsample_mode(options.chroma),
            keep: ForeignKeep::None, // strip metadata
            ..ops::HeifsaveOptions::default()
        };

        debug!(
            "heifsave '{}' q={} effort={} chroma={}",
            output.display(),
            opts.q,
            opts.effort,
            options.chroma
        );

        ops::heifsave_with_opts(&image, output_str, &opts)
            .map_err(|e| ConverterError::encode(format!("AVIF save failed: {e}")))
    }
}

fn load(input: &Path) -> ConverterResult<VipsImage> {
    VipsImage::new_from_file(utf8(input)?)
        .map_err(|e| ConverterError::encode(format!("Failed to load '{}': {e}", input.display())))
}

fn utf8(path: &Path) -> ConverterResult<&str> {
    path.to_str()
        .ok_or_else(|| ConverterError::encode(format!("Path is not valid UTF-8: {}", path.display())))
}

/// Grey+alpha (2 bands) or RGBA and wider (4+ bands).
///
/// CMYK sources also report 4 bands and end up encoded at 4:4:4.
fn bands_have_alpha(bands: u32) -> bool {
    bands == 2 || bands >= 4
}

/// Maps speed 1 (slowest) ..= 10 (fastest) onto libvips effort 9 ..= 0.
fn effort_for_speed(speed: u8) -> i32 {
    (10 - i32::from(speed)).clamp(0, 9)
}

fn subsample_mode(chroma: ChromaSubsampling) -> ForeignSubsample {
    match chroma {
        ChromaSubsampling::Yuv444 => ForeignSubsample::Off,
        ChromaSubsampling::Yuv420 => ForeignSubsample::On,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_mapping() {
        assert_eq!(effort_for_speed(1), 9);
        assert_eq!(effort_for_speed(6), 4);
        assert_eq!(effort_for_speed(10), 0);
    }

    #[test]
    fn test_alpha_detection_by_bands() {
        assert!(!bands_have_alpha(1));
        assert!(bands_have_alpha(2));
        assert!(!bands_have_alpha(3));
        assert!(bands_have_alpha(4));
    }
}
