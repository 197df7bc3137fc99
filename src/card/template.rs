//! Card template loading and placeholder substitution.
//!
//! The substitution itself is a pure function over `{{name}}` markers, kept
//! free of I/O so it stays unit-testable without a filesystem or rasterizer.

use crate::embed::TemplateVars;
use anyhow::{Context, Result, bail};
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Placeholder names recognized by the card template.
pub const PLACEHOLDERS: [&str; 3] = ["title1", "title2", "title3"];

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

/// Replace `{{name}}` markers with values from the map.
///
/// Markers without a value are replaced with the empty string, so a
/// half-filled template never leaks a literal `{{...}}` into the output.
pub fn substitute(template: &str, values: &FxHashMap<&str, &str>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values.get(&caps[1]).copied().unwrap_or("").to_string()
        })
        .into_owned()
}

/// Check whether the template contains a `{{name}}` marker.
pub fn has_placeholder(template: &str, name: &str) -> bool {
    PLACEHOLDER_RE
        .captures_iter(template)
        .any(|caps| &caps[1] == name)
}

// ============================================================================
// Card variables
// ============================================================================

/// Variables injected into the card template: up to three title lines.
///
/// Lines are XML-escaped here, since the rendered document is parsed as SVG.
pub struct CardVars {
    lines: [String; 3],
}

impl CardVars {
    /// Build from wrapped title lines. Missing lines render as empty strings.
    pub fn from_lines(lines: &[String]) -> Self {
        let mut escaped: [String; 3] = Default::default();
        for (slot, line) in escaped.iter_mut().zip(lines) {
            *slot = escape_xml(line).into_owned();
        }
        Self { lines: escaped }
    }
}

impl TemplateVars for CardVars {
    fn apply(&self, content: &str) -> String {
        let values = FxHashMap::from_iter([
            (PLACEHOLDERS[0], self.lines[0].as_str()),
            (PLACEHOLDERS[1], self.lines[1].as_str()),
            (PLACEHOLDERS[2], self.lines[2].as_str()),
        ]);
        substitute(content, &values)
    }
}

// ============================================================================
// Card template
// ============================================================================

/// The card template, loaded once at startup and shared read-only.
#[derive(Debug)]
pub struct CardTemplate {
    source: String,
}

impl CardTemplate {
    /// Load the template from disk, failing fast when missing or incomplete.
    ///
    /// Without a template no card can ever be produced, so this error aborts
    /// the build instead of being swallowed per page.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read card template {}", path.display()))?;
        Self::from_source(source)
            .with_context(|| format!("Invalid card template {}", path.display()))
    }

    /// Build a template from SVG source, checking the placeholder contract.
    pub fn from_source(source: String) -> Result<Self> {
        for name in PLACEHOLDERS {
            if !has_placeholder(&source, name) {
                bail!("missing the {{{{{name}}}}} placeholder");
            }
        }
        Ok(Self { source })
    }

    /// Render the template with the given variables.
    pub fn render(&self, vars: &CardVars) -> String {
        vars.apply(&self.source)
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(pairs: &[(&'a str, &'a str)]) -> FxHashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_substitute_basic() {
        let out = substitute("<text>{{title1}}</text>", &values(&[("title1", "Hello")]));
        assert_eq!(out, "<text>Hello</text>");
    }

    #[test]
    fn test_substitute_missing_value_empty() {
        let out = substitute("a{{title2}}b", &values(&[]));
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_substitute_unknown_marker_empty() {
        // Markers outside the recognized set collapse to empty string too
        let out = substitute("x{{subtitle}}y", &values(&[("title1", "Hello")]));
        assert_eq!(out, "xy");
    }

    #[test]
    fn test_substitute_whitespace_in_marker() {
        let out = substitute("{{ title1 }}", &values(&[("title1", "Hi")]));
        assert_eq!(out, "Hi");
    }

    #[test]
    fn test_substitute_pure() {
        // Same inputs, same output; template untouched
        let template = "{{title1}}-{{title2}}";
        let vals = values(&[("title1", "a"), ("title2", "b")]);
        assert_eq!(substitute(template, &vals), substitute(template, &vals));
        assert_eq!(template, "{{title1}}-{{title2}}");
    }

    #[test]
    fn test_has_placeholder() {
        assert!(has_placeholder("x {{title1}} y", "title1"));
        assert!(has_placeholder("{{ title3 }}", "title3"));
        assert!(!has_placeholder("x {{title1}} y", "title2"));
        assert!(!has_placeholder("no markers here", "title1"));
    }

    #[test]
    fn test_card_vars_fill_and_escape() {
        let vars = CardVars::from_lines(&["Tom & Jerry".to_string(), "<tag>".to_string()]);
        let out = vars.apply("{{title1}}|{{title2}}|{{title3}}");
        assert_eq!(out, "Tom &amp; Jerry|&lt;tag&gt;|");
    }

    #[test]
    fn test_template_requires_all_placeholders() {
        let err = CardTemplate::from_source("<svg>{{title1}}{{title2}}</svg>".into()).unwrap_err();
        assert!(err.to_string().contains("title3"));
    }

    #[test]
    fn test_template_render() {
        let template = CardTemplate::from_source(
            "<svg>{{title1}}/{{title2}}/{{title3}}</svg>".into(),
        )
        .unwrap();
        let out = template.render(&CardVars::from_lines(&["One".to_string()]));
        assert_eq!(out, "<svg>One//</svg>");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }
}
