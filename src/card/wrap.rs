//! Title word-wrapping.
//!
//! Splits a page title into the bounded display lines substituted into the
//! card template.

/// Soft per-line character limit.
pub const SOFT_LINE_LIMIT: usize = 30;

/// Maximum number of lines rendered on a card.
pub const MAX_LINES: usize = 3;

/// Split a title into at most [`MAX_LINES`] display lines.
///
/// Greedy word-wrap: words accumulate on a line while it stays within
/// [`SOFT_LINE_LIMIT`] characters; the break happens at the whitespace
/// before the word that would overflow. A single word longer than the limit
/// is never broken, so a line can exceed the limit (soft limit).
///
/// Text beyond the third line is dropped with no truncation marker.
pub fn wrap_title(title: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::with_capacity(MAX_LINES);
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in title.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > SOFT_LINE_LIMIT {
            lines.push(std::mem::take(&mut current));
            if lines.len() == MAX_LINES {
                // Everything past the third line is dropped.
                return lines;
            }
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
