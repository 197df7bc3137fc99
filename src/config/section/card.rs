//! `[card]` section configuration.
//!
//! Card template and rasterization settings.
//!
//! # Example
//!
//! ```toml
//! [card]
//! template = "templates/og-card.svg"
//! format = "png"           # Output format: png | jpg | webp
//! converter = "builtin"    # Conversion backend: builtin | magick | ffmpeg
//! quality = 90             # Quality for lossy formats (0-100)
//! ```
//!
//! # Behavior
//!
//! - `format = "png"` -> lossless bitmap (the Open Graph default)
//! - `format = "jpg" | "webp"` -> lossy, `quality` applies
//! - `converter = "builtin"` -> pure-Rust rendering, no external tools
//! - `converter = "magick" | "ffmpeg"` -> the command must be installed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigDiagnostics;

/// Card output format
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardFormat {
    /// PNG format (lossless).
    #[default]
    PNG,
    /// JPEG format.
    JPG,
    /// WebP format.
    WEBP,
}

impl CardFormat {
    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::PNG => "png",
            Self::JPG => "jpg",
            Self::WEBP => "webp",
        }
    }

    /// Check if this format is lossy (quality setting applies).
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::JPG)
    }
}

/// Card conversion backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardConverter {
    /// Use built-in Rust libraries.
    #[default]
    Builtin,
    /// Use ImageMagick (`magick` command).
    Magick,
    /// Use FFmpeg for conversion.
    Ffmpeg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Card template path (relative to project root).
    /// An SVG document carrying the `{{title1}}`..`{{title3}}` markers.
    pub template: PathBuf,

    /// Output format for generated cards.
    pub format: CardFormat,

    /// Conversion backend for rasterization.
    pub converter: CardConverter,

    /// Quality for lossy formats (0-100).
    pub quality: u8,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("templates/og-card.svg"),
            format: CardFormat::PNG,
            converter: CardConverter::Builtin,
            quality: 90,
        }
    }
}

impl CardConfig {
    /// Validate card configuration.
    ///
    /// # Checks
    /// - `quality` stays in range
    /// - external converters (magick/ffmpeg) must be installed
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.quality > 100 {
            diag.error("card.quality", "quality must be between 0 and 100");
        }

        match &self.converter {
            CardConverter::Builtin => {}
            CardConverter::Magick => {
                if which::which("magick").is_err() {
                    diag.error_with_hint(
                        "card.converter",
                        "`magick` command not found",
                        "install ImageMagick or set card.converter = \"builtin\"",
                    );
                }
            }
            CardConverter::Ffmpeg => {
                if which::which("ffmpeg").is_err() {
                    diag.error_with_hint(
                        "card.converter",
                        "`ffmpeg` command not found",
                        "install FFmpeg or set card.converter = \"builtin\"",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.card.template, PathBuf::from("templates/og-card.svg"));
        assert_eq!(config.card.format, CardFormat::PNG);
        assert_eq!(config.card.converter, CardConverter::Builtin);
        assert_eq!(config.card.quality, 90);
    }

    #[test]
    fn test_format_parsing() {
        let cases = [
            ("png", CardFormat::PNG),
            ("jpg", CardFormat::JPG),
            ("webp", CardFormat::WEBP),
        ];
        for (input, expected) in cases {
            let config = test_parse_config(&format!("[card]\nformat = \"{input}\""));
            assert_eq!(config.card.format, expected, "failed for {input}");
        }
    }

    #[test]
    fn test_converter_parsing() {
        let cases = [
            ("builtin", CardConverter::Builtin),
            ("magick", CardConverter::Magick),
            ("ffmpeg", CardConverter::Ffmpeg),
        ];
        for (input, expected) in cases {
            let config = test_parse_config(&format!("[card]\nconverter = \"{input}\""));
            assert_eq!(config.card.converter, expected, "failed for {input}");
        }
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(CardFormat::PNG.extension(), "png");
        assert_eq!(CardFormat::JPG.extension(), "jpg");
        assert_eq!(CardFormat::WEBP.extension(), "webp");
    }

    #[test]
    fn test_is_lossy() {
        assert!(!CardFormat::PNG.is_lossy());
        assert!(CardFormat::JPG.is_lossy());
    }

    #[test]
    fn test_quality_out_of_range() {
        let config = test_parse_config("[card]\nquality = 150");
        let mut diag = ConfigDiagnostics::new();
        config.card.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
