//! Page manifest loading.
//!
//! The page-build pipeline emits a `pages.json` manifest, one record per
//! page. Ogcard only consumes titles and routes; everything else about a
//! page (content, metadata, rendering) belongs to the site build.
//!
//! # Manifest Format
//!
//! ```json
//! [
//!   { "route": "index", "title": "Home" },
//!   { "route": "blog/first-post", "title": "My First Post" }
//! ]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// A single page entry from the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    /// Page route relative to the site root (e.g. `blog/first-post`).
    pub route: String,
    /// Display title rendered onto the card.
    pub title: String,
}

/// Page manifest: the list of pages needing preview cards.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub pages: Vec<PageEntry>,
}

impl Manifest {
    /// Load the manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page manifest {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse a manifest from JSON text.
    pub fn from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse page manifest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_str(
            r#"[
                { "route": "index", "title": "Home" },
                { "route": "blog/first-post", "title": "My First Post" }
            ]"#,
        )
        .unwrap();

        assert_eq!(manifest.pages.len(), 2);
        assert_eq!(manifest.pages[0].route, "index");
        assert_eq!(manifest.pages[1].title, "My First Post");
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::from_str("[]").unwrap();
        assert!(manifest.pages.is_empty());
    }

    #[test]
    fn test_parse_invalid_manifest() {
        assert!(Manifest::from_str("{ not json").is_err());
        // Missing required fields
        assert!(Manifest::from_str(r#"[{ "route": "index" }]"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/pages.json")).unwrap_err();
        assert!(err.to_string().contains("pages.json"));
    }
}
