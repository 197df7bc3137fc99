//! Embedded static resources for Ogcard.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//!
//! # Usage
//!
//! ```ignore
//! use embed::{CONFIG_TOML, ConfigVars, DEFAULT_CARD_SVG};
//!
//! // Render starter config for `ogcard init`
//! let toml = CONFIG_TOML.render(&ConfigVars { project_name: "my-blog" });
//!
//! // Default card template (written verbatim)
//! let svg = DEFAULT_CARD_SVG;
//! ```

mod template;

// Re-export core types
pub use template::{Template, TemplateVars};

/// Variables for the starter ogcard.toml.
pub struct ConfigVars<'a> {
    pub project_name: &'a str,
}

impl TemplateVars for ConfigVars<'_> {
    fn apply(&self, content: &str) -> String {
        content.replace("__PROJECT_NAME__", self.project_name)
    }
}

/// Starter configuration written by `ogcard init`.
pub const CONFIG_TOML: Template<ConfigVars<'static>> = Template::new(include_str!("ogcard.toml"));

/// Default card template written by `ogcard init`.
///
/// Carries the three `{{title1}}`..`{{title3}}` markers the generator
/// substitutes per page.
pub const DEFAULT_CARD_SVG: &str = include_str!("card.svg");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template() {
        let vars = ConfigVars {
            project_name: "my-blog",
        };
        let rendered = CONFIG_TOML.render(&vars);
        assert!(rendered.contains("my-blog"));
        assert!(!rendered.contains("__PROJECT_NAME__"));
        assert!(rendered.contains("[card]"));
    }

    #[test]
    fn test_default_card_has_markers() {
        for marker in ["{{title1}}", "{{title2}}", "{{title3}}"] {
            assert!(DEFAULT_CARD_SVG.contains(marker), "missing {marker}");
        }
    }

    #[test]
    fn test_starter_config_parses() {
        let vars = ConfigVars {
            project_name: "my-blog",
        };
        let rendered = CONFIG_TOML.render(&vars);
        let config = crate::config::OgConfig::from_str(&rendered).unwrap();
        assert_eq!(config.card.quality, 90);
    }
}
