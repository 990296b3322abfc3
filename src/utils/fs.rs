use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::{ConverterError, ConverterResult, OUTPUT_EXTENSION};

/// Get file size in bytes
pub async fn get_file_size(path: impl AsRef<Path>) -> ConverterResult<u64> {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.len())
        .map_err(|e| ConverterError::io(format!(
            "Failed to get file size of {}: {e}",
            path.as_ref().display()
        )))
}

/// Creates the parent directory of `path` (and its ancestors) if missing.
pub async fn ensure_parent_dir(path: impl AsRef<Path>) -> ConverterResult<()> {
    let Some(parent) = path.as_ref().parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent)
        .await
        .map_err(|e| ConverterError::io(format!(
            "Cannot create output directory {}: {e}",
            parent.display()
        )))
}

/// Maps `file` under `input_root` to its `.avif` counterpart under `output_root`.
///
/// The path relative to `input_root` is kept and only the last extension is
/// replaced, so `<input>/sub/a.png` becomes `<output>/sub/a.avif`. A file with
/// no extension gets `.avif` appended.
pub fn output_path_for(input_root: &Path, output_root: &Path, file: &Path) -> PathBuf {
    let relative = file.strip_prefix(input_root).unwrap_or_else(|_| {
        // Not under the root: fall back to the bare file name
        file.file_name().map(Path::new).unwrap_or(file)
    });
    output_root.join(relative).with_extension(OUTPUT_EXTENSION)
}
