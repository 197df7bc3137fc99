//! Open Graph card generation.
//!
//! # Module Structure
//!
//! ```text
//! card/
//! ├── wrap       # Title word-wrapping into bounded lines
//! ├── template   # Placeholder substitution + template loading
//! ├── render     # SVG rasterization backends
//! ├── route      # Route -> card filename derivation
//! └── mod.rs     # CardGenerator (this file)
//! ```

pub mod render;
pub mod route;
pub mod template;
pub mod wrap;

pub use route::card_filename;
pub use template::{CardTemplate, CardVars};
pub use wrap::wrap_title;

use crate::config::OgConfig;
use crate::log;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Fixed card width in pixels.
pub const CARD_WIDTH: u32 = 1440;

/// Fixed card height in pixels.
pub const CARD_HEIGHT: u32 = 810;

/// Result of one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Card was rendered and written.
    Written,
    /// A file already existed at the output path.
    Skipped,
    /// Generation failed; a warning was logged.
    Failed,
}

/// Card generator: the loaded template plus card settings.
///
/// Safe to share across worker threads - the template is read-only after
/// load. The existence check and the write are not atomic against a
/// concurrent call targeting the *same* output path; distinct routes map to
/// distinct paths, so that race is unreachable in normal batch operation.
pub struct CardGenerator<'a> {
    template: CardTemplate,
    config: &'a OgConfig,
}

impl<'a> CardGenerator<'a> {
    /// Load the card template and build a generator.
    ///
    /// Template errors are fatal: without a template no card can ever be
    /// produced, so the build aborts here instead of warning per page.
    pub fn new(config: &'a OgConfig) -> Result<Self> {
        let template = CardTemplate::load(&config.card.template)?;
        Ok(Self::with_template(template, config))
    }

    /// Build a generator from an already-loaded template.
    pub fn with_template(template: CardTemplate, config: &'a OgConfig) -> Self {
        Self { template, config }
    }

    /// Generate one card, best-effort.
    ///
    /// Any per-card failure is logged as a warning naming the output path
    /// and swallowed: a missing preview image degrades social-sharing
    /// cosmetics for that one page, it never fails the site build.
    pub fn generate(&self, title: &str, output: &Path) -> Outcome {
        match self.try_generate(title, output) {
            Ok(outcome) => outcome,
            Err(e) => {
                log!("warning"; "card {} failed: {:#}", output.display(), e);
                Outcome::Failed
            }
        }
    }

    fn try_generate(&self, title: &str, output: &Path) -> Result<Outcome> {
        // An existing file wins: the path is the cache key and is never
        // regenerated or overwritten.
        if output.is_file() {
            return Ok(Outcome::Skipped);
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create card directory {}", parent.display())
            })?;
        }

        crate::debug!("card"; "generating {}", output.display());

        let lines = wrap::wrap_title(title.trim());
        let svg = self.template.render(&CardVars::from_lines(&lines));
        let bytes = render::rasterize(
            &svg,
            &self.config.card.format,
            &self.config.card.converter,
            self.config.card.quality,
        )?;

        fs::write(output, &bytes)
            .with_context(|| format!("Failed to write card {}", output.display()))?;

        Ok(Outcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::DEFAULT_CARD_SVG;
    use tempfile::TempDir;

    fn test_generator(config: &OgConfig) -> CardGenerator<'_> {
        let template = CardTemplate::from_source(DEFAULT_CARD_SVG.to_string()).unwrap();
        CardGenerator::with_template(template, config)
    }

    #[test]
    fn test_generate_creates_directories_and_card() {
        let temp = TempDir::new().unwrap();
        let config = OgConfig::default();
        let generator = test_generator(&config);

        // Parent chain does not exist yet
        let output = temp.path().join("dist/og/blog-first-post.png");
        let outcome = generator.generate("My First Post", &output);

        assert_eq!(outcome, Outcome::Written);
        assert!(temp.path().join("dist/og").is_dir());
        assert!(output.is_file());

        // Fixed resolution regardless of title
        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (CARD_WIDTH, CARD_HEIGHT));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = OgConfig::default();
        let generator = test_generator(&config);

        let output = temp.path().join("card.png");
        std::fs::write(&output, b"sentinel").unwrap();

        // Existing file short-circuits: nothing re-rendered, nothing touched
        let outcome = generator.generate("Some Title", &output);
        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(std::fs::read(&output).unwrap(), b"sentinel");
    }

    #[test]
    fn test_generate_empty_title() {
        let temp = TempDir::new().unwrap();
        let config = OgConfig::default();
        let generator = test_generator(&config);

        let output = temp.path().join("empty.png");
        assert_eq!(generator.generate("   ", &output), Outcome::Written);
        assert!(output.is_file());
    }

    #[test]
    fn test_generate_failure_is_contained() {
        let temp = TempDir::new().unwrap();
        let config = OgConfig::default();

        // Placeholders present, but not a valid SVG document: rasterization
        // fails, generate() must swallow it
        let template = CardTemplate::from_source(
            "{{title1}} {{title2}} {{title3}} - not an svg".to_string(),
        )
        .unwrap();
        let generator = CardGenerator::with_template(template, &config);

        let output = temp.path().join("broken.png");
        assert_eq!(generator.generate("Title", &output), Outcome::Failed);
        assert!(!output.exists());
    }

    #[test]
    fn test_generate_long_title_still_fixed_size() {
        let temp = TempDir::new().unwrap();
        let config = OgConfig::default();
        let generator = test_generator(&config);

        let title = "A very long title that wraps across several lines and \
                     then keeps going well past the third line of the card";
        let output = temp.path().join("long.png");
        assert_eq!(generator.generate(title, &output), Outcome::Written);

        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (CARD_WIDTH, CARD_HEIGHT));
    }
}
