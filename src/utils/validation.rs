use std::path::Path;
use crate::core::{AvifSettings, BatchSettings};
use crate::utils::{ConverterError, ConverterResult};

/// Validates encoder settings
pub fn validate_settings(settings: &AvifSettings) -> ConverterResult<()> {
    if !(1..=100).contains(&settings.quality) {
        return Err(ConverterError::validation(
            format!("Invalid quality value: {}. Must be between 1 and 100", settings.quality)
        ));
    }

    if !(1..=10).contains(&settings.speed) {
        return Err(ConverterError::validation(
            format!("Invalid speed value: {}. Must be between 1 and 10", settings.speed)
        ));
    }

    Ok(())
}

/// Validates batch settings, including the per-file encoder settings
pub fn validate_batch_settings(settings: &BatchSettings) -> ConverterResult<()> {
    validate_settings(&settings.avif)?;

    if settings.concurrency == 0 {
        return Err(ConverterError::validation("Concurrency must be at least 1"));
    }

    if settings.pattern.trim().is_empty() {
        return Err(ConverterError::validation("Pattern cannot be empty"));
    }

    Ok(())
}

/// Validates that the input path exists and is a regular file
pub async fn validate_input_file(path: &Path) -> ConverterResult<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(ConverterError::missing_input(path)),
    }
}
