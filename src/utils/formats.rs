use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use crate::utils::ConverterError;

/// Extension (without the dot) of every file the converter writes.
pub const OUTPUT_EXTENSION: &str = "avif";

/// Glob used by `batch` when no pattern is given.
pub const DEFAULT_PATTERN: &str = "**/*.{jpg,jpeg,png,webp,gif}";

/// Raster formats accepted as conversion input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    JPEG,
    PNG,
    WebP,
    GIF,
    SVG,
    TIFF,
    BMP,
}

impl InputFormat {
    pub const ALL: [InputFormat; 7] = [
        Self::JPEG,
        Self::PNG,
        Self::WebP,
        Self::GIF,
        Self::SVG,
        Self::TIFF,
        Self::BMP,
    ];

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
            Self::GIF => &["gif"],
            Self::SVG => &["svg"],
            Self::TIFF => &["tiff"],
            Self::BMP => &["bmp"],
        }
    }

    /// Human-readable names, as printed by `formats`
    pub fn display_names(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["JPEG", "JPG"],
            Self::PNG => &["PNG"],
            Self::WebP => &["WebP"],
            Self::GIF => &["GIF"],
            Self::SVG => &["SVG"],
            Self::TIFF => &["TIFF"],
            Self::BMP => &["BMP"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_names()[0])
    }
}

impl FromStr for InputFormat {
    type Err = ConverterError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.matches_extension(ext))
            .ok_or_else(|| ConverterError::validation(format!("Unsupported image format: {ext}")))
    }
}

/// Format listing returned by the `formats` command.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedFormats {
    pub input: Vec<&'static str>,
    pub output: Vec<&'static str>,
}

pub fn list_supported_formats() -> SupportedFormats {
    SupportedFormats {
        input: InputFormat::ALL
            .iter()
            .flat_map(|format| format.display_names().iter().copied())
            .collect(),
        output: vec!["AVIF"],
    }
}

/// Every supported input extension, dot included.
pub fn supported_extensions() -> Vec<String> {
    InputFormat::ALL
        .iter()
        .flat_map(|format| format.extensions().iter().map(|ext| format!(".{ext}")))
        .collect()
}

/// Returns `true` when `filename` ends with a supported input extension (case-insensitive).
pub fn is_format_supported(filename: &str) -> bool {
    let name = filename.to_lowercase();
    supported_extensions().iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Lowercase extension of `path`, if it has one.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_supported_extensions_are_accepted() {
        for ext in supported_extensions() {
            assert!(is_format_supported(&format!("image{ext}")), "{ext} should be supported");
        }
    }

    #[test]
    fn test_output_extension_is_not_an_input() {
        assert!(!is_format_supported("test.avif"));
        assert!(!is_format_supported(&format!("photo.{OUTPUT_EXTENSION}")));
    }

    #[test]
    fn test_is_format_supported_ignores_case() {
        assert!(is_format_supported("test.JPG"));
        assert!(is_format_supported("Scan.Tiff"));
        assert!(!is_format_supported("notes.txt"));
    }

    #[test]
    fn test_from_str_resolves_aliases() {
        assert_eq!("jpeg".parse::<InputFormat>().unwrap(), InputFormat::JPEG);
        assert_eq!(".JPG".parse::<InputFormat>().unwrap(), InputFormat::JPEG);
        assert!("avif".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_listing_has_single_output() {
        let formats = list_supported_formats();
        assert_eq!(formats.output, vec!["AVIF"]);
        assert_eq!(
            formats.input,
            vec!["JPEG", "JPG", "PNG", "WebP", "GIF", "SVG", "TIFF", "BMP"]
        );
    }
}
