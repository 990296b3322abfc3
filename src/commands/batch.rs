use std::fmt::Write as _;
use std::path::Path;
use anyhow::{Context, Result};
use tracing::info;

use crate::core::{BatchResult, ConverterConfig};
use crate::processing::{BatchProcessor, SharedEncoder};

const MIB: f64 = 1024.0 * 1024.0;

/// Converts every matching image under `input_dir` into `output_dir`.
///
/// Per-file failures are part of the returned [`BatchResult`]; only setup
/// errors (invalid settings, missing input directory) are returned as `Err`.
pub async fn batch_convert(
    config: &ConverterConfig,
    encoder: SharedEncoder,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchResult> {
    info!("Batch converting {} → {}", input_dir.display(), output_dir.display());

    let processor = BatchProcessor::new(encoder);
    let result = processor
        .process_directory(input_dir, output_dir, &config.batch_settings())
        .await
        .with_context(|| format!("Batch conversion of {} failed", input_dir.display()))?;

    Ok(result)
}

/// Plain-text summary printed after `batch`.
pub fn render_batch_summary(result: &BatchResult) -> String {
    let mut out = String::new();

    if result.total == 0 {
        out.push_str("No matching image files found\n");
        return out;
    }

    let _ = writeln!(out, "=== Conversion results ===");
    let _ = writeln!(out, "Converted: {} files", result.success);
    let _ = writeln!(out, "Failed:    {} files", result.failed);

    if result.total_original_size > 0 {
        let _ = writeln!(out, "Original size:  {:.2} MB", result.total_original_size as f64 / MIB);
        let _ = writeln!(out, "Converted size: {:.2} MB", result.total_converted_size as f64 / MIB);
        let _ = writeln!(out, "Total compression: {:.2}%", result.compression_ratio());
    }

    if !result.errors.is_empty() {
        let _ = writeln!(out, "\n=== Errors ===");
        for error in &result.errors {
            let _ = writeln!(out, "{}: {}", error.file.display(), error.error);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Scheduling;
    use crate::processing::testing::FakeEncoder;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_batch_convert_honours_config() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("a.png"), b"aaaa").unwrap();
        std::fs::write(input.path().join("b.bmp"), b"bbbb").unwrap();

        let mut config = ConverterConfig::default();
        config.pattern = "*.bmp".to_string();
        config.scheduling = Scheduling::Chunked;

        let result = batch_convert(&config, Arc::new(FakeEncoder::new()), input.path(), output.path())
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert!(output.path().join("b.avif").is_file());
    }

    #[tokio::test]
    async fn test_batch_convert_missing_input_is_error() {
        let root = tempfile::tempdir().unwrap();
        let err = batch_convert(
            &ConverterConfig::default(),
            Arc::new(FakeEncoder::new()),
            &root.path().join("absent"),
            &root.path().join("out"),
        )
        .await
        .unwrap_err();

        assert!(format!("{err:#}").contains("Input not found"));
    }

    #[test]
    fn test_summary_lists_errors() {
        let mut result = BatchResult::new(1);
        result.record_failure(PathBuf::from("/in/bad.png"), "Encode error: truncated");

        let summary = render_batch_summary(&result);
        assert!(summary.contains("Failed:    1 files"));
        assert!(summary.contains("/in/bad.png: Encode error: truncated"));
    }

    #[test]
    fn test_summary_for_empty_batch() {
        assert_eq!(render_batch_summary(&BatchResult::new(0)), "No matching image files found\n");
    }
}
