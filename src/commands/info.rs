use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{ChromaSubsampling, ImageMetadata};
use crate::processing::SharedEncoder;
use crate::utils::{get_file_size, validate_input_file};

/// What `info` reports about a source image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub metadata: ImageMetadata,
    /// Subsampling a conversion of this image would use
    pub chroma: ChromaSubsampling,
}

pub async fn image_info(encoder: SharedEncoder, path: &Path) -> Result<ImageInfo> {
    validate_input_file(path).await?;
    let size_bytes = get_file_size(path).await?;

    let input = path.to_path_buf();
    let metadata = tokio::task::spawn_blocking(move || encoder.inspect(&input))
        .await
        .context("Inspection task panicked")?
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(ImageInfo {
        path: path.to_path_buf(),
        size_bytes,
        chroma: ChromaSubsampling::for_source(&metadata),
        metadata,
    })
}

pub fn render_info(info: &ImageInfo) -> String {
    format!(
        "{}\n  Dimensions: {}×{}\n  Channels:   {}{}\n  Format:     {}\n  Size:       {} bytes ({:.2} MB)\n  AVIF chroma: {}\n",
        info.path.display(),
        info.metadata.width,
        info.metadata.height,
        info.metadata.bands,
        if info.metadata.has_alpha { " (alpha)" } else { "" },
        info.metadata.format.as_deref().unwrap_or("unknown"),
        info.size_bytes,
        info.size_bytes as f64 / (1024.0 * 1024.0),
        info.chroma,
    )
}
