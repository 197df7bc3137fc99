//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"          # site output directory
//! images = "og"            # card subdirectory inside output
//! manifest = "pages.json"  # page manifest emitted by the site build
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Site output directory (relative to project root).
    pub output: PathBuf,

    /// Card subdirectory inside the output directory.
    /// Must stay relative: cards always land inside `output`.
    pub images: PathBuf,

    /// Page manifest emitted by the page-build pipeline
    /// (relative to project root).
    pub manifest: PathBuf,

    /// Remove previously generated cards before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            images: PathBuf::from("og"),
            manifest: PathBuf::from("pages.json"),
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    /// Validate build configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.images.is_absolute() {
            diag.error_with_hint(
                "build.images",
                "must be a relative path",
                "cards are written inside the output directory, e.g. images = \"og\"",
            );
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
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.images, PathBuf::from("og"));
        assert_eq!(config.build.manifest, PathBuf::from("pages.json"));
        assert!(!config.build.clean);
    }

    #[test]
    fn test_overrides() {
        let config = test_parse_config("[build]\noutput = \"public\"\nimages = \"cards\"");
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.images, PathBuf::from("cards"));
    }

    #[test]
    fn test_absolute_images_rejected() {
        let config = test_parse_config("[build]\nimages = \"/tmp/cards\"");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
