//! Card filename derivation from page routes.

use crate::config::CardFormat;
use deunicode::deunicode;

/// Derive the card filename for a page route.
///
/// Path separators become `-` so the whole site maps into one flat card
/// directory; non-ASCII is transliterated, the result is lowercased, and
/// anything else unsafe collapses to `-`. The extension always matches the configured format, so distinct
/// routes land on distinct files.
///
/// # Examples
///
/// - `blog/first-post` -> `blog-first-post.png`
/// - `über/uns` -> `uber-uns.png`
/// - `` -> `index.png`
pub fn card_filename(route: &str, format: &CardFormat) -> String {
    let ascii = deunicode(route.trim_matches('/')).to_ascii_lowercase();

    let mut name = String::with_capacity(ascii.len());
    let mut prev_dash = false;
    for ch in ascii.chars() {
        let mapped = match ch {
            c if c.is_ascii_alphanumeric() || c == '_' => Some(c),
            _ => None, // separators and unsafe characters all collapse to `-`
        };
        match mapped {
            Some(c) => {
                name.push(c);
                prev_dash = false;
            }
            None if !prev_dash && !name.is_empty() => {
                name.push('-');
                prev_dash = true;
            }
            None => {}
        }
    }

    // Drop a trailing dash left by the collapse
    if name.ends_with('-') {
        name.pop();
    }

    if name.is_empty() {
        name.push_str("index");
    }

    format!("{}.{}", name, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_route() {
        assert_eq!(
            card_filename("blog/first-post", &CardFormat::PNG),
            "blog-first-post.png"
        );
    }

    #[test]
    fn test_extension_follows_format() {
        assert_eq!(card_filename("about", &CardFormat::JPG), "about.jpg");
        assert_eq!(card_filename("about", &CardFormat::WEBP), "about.webp");
    }

    #[test]
    fn test_surrounding_slashes_trimmed() {
        assert_eq!(card_filename("/blog/post/", &CardFormat::PNG), "blog-post.png");
    }

    #[test]
    fn test_repeated_separators_collapse() {
        assert_eq!(card_filename("a//b", &CardFormat::PNG), "a-b.png");
        assert_eq!(card_filename("a - b", &CardFormat::PNG), "a-b.png");
    }

    #[test]
    fn test_unicode_transliterated() {
        assert_eq!(card_filename("über/uns", &CardFormat::PNG), "uber-uns.png");
        assert_eq!(card_filename("日記/最初", &CardFormat::PNG), "ri-ji-zui-chu.png");
    }

    #[test]
    fn test_empty_route() {
        assert_eq!(card_filename("", &CardFormat::PNG), "index.png");
        assert_eq!(card_filename("///", &CardFormat::PNG), "index.png");
    }
}
