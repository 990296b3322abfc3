//! Resolved converter configuration.
//!
//! Built once in `main` from defaults, an optional TOML file and CLI flags,
//! then passed by reference to each command handler.

use std::path::Path;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::core::{AvifSettings, BatchSettings, Scheduling};
use crate::utils::{validate_batch_settings, DEFAULT_PATTERN};

/// File looked up in the working directory when no `--config-file` is given.
pub const DEFAULT_CONFIG_FILE: &str = "avif-converter.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub quality: u8,
    pub speed: u8,
    pub pattern: String,
    pub concurrency: usize,
    pub scheduling: Scheduling,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        let batch = BatchSettings::default();
        Self {
            quality: batch.avif.quality,
            speed: batch.avif.speed,
            pattern: DEFAULT_PATTERN.to_string(),
            concurrency: batch.concurrency,
            scheduling: batch.scheduling,
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    quality: Option<u8>,
    speed: Option<u8>,
    pattern: Option<String>,
    concurrent: Option<usize>,
    scheduling: Option<Scheduling>,
}

/// Per-invocation overrides taken from the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub quality: Option<u8>,
    pub speed: Option<u8>,
    pub pattern: Option<String>,
    pub concurrency: Option<usize>,
    pub scheduling: Option<Scheduling>,
}

impl ConverterConfig {
    /// Parses a TOML document on top of the defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse config file")?;
        let mut config = Self::default();
        config.apply(ConfigOverrides {
            quality: file.quality,
            speed: file.speed,
            pattern: file.pattern,
            concurrency: file.concurrent,
            scheduling: file.scheduling,
        });
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `custom_path`, else `./avif-converter.toml` if present, else defaults.
    pub fn load_or_default(custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            return Self::load(default_path);
        }

        Ok(Self::default())
    }

    /// Overlays every `Some` value.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(quality) = overrides.quality {
            self.quality = quality;
        }
        if let Some(speed) = overrides.speed {
            self.speed = speed;
        }
        if let Some(pattern) = overrides.pattern {
            self.pattern = pattern;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(scheduling) = overrides.scheduling {
            self.scheduling = scheduling;
        }
    }

    pub fn avif_settings(&self) -> AvifSettings {
        AvifSettings {
            quality: self.quality,
            speed: self.speed,
        }
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            avif: self.avif_settings(),
            pattern: self.pattern.clone(),
            concurrency: self.concurrency,
            scheduling: self.scheduling,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_batch_settings(&self.batch_settings())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.quality, 80);
        assert_eq!(config.speed, 6);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.pattern, "**/*.{jpg,jpeg,png,webp,gif}");
        assert_eq!(config.scheduling, Scheduling::Pooled);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConverterConfig::from_toml("quality = 60\nscheduling = \"chunked\"\n").unwrap();
        assert_eq!(config.quality, 60);
        assert_eq!(config.speed, 6);
        assert_eq!(config.scheduling, Scheduling::Chunked);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(ConverterConfig::from_toml("qualty = 60").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = ConverterConfig::from_toml("quality = 60\nconcurrent = 8").unwrap();
        config.apply(ConfigOverrides {
            quality: Some(90),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.quality, 90);
        assert_eq!(config.concurrency, 8);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = ConverterConfig::default();
        config.apply(ConfigOverrides {
            speed: Some(42),
            ..ConfigOverrides::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "pattern = \"*.png\"\n").unwrap();
        let config = ConverterConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.pattern, "*.png");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConverterConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
