//! HTML text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}

/// Truncate to at most `length` characters plus the omission marker.
///
/// A cut that lands inside a word backs off to the previous whitespace,
/// unless the first word alone is longer than `length`.
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .nth(length)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    let head = &s[..cut];
    let mid_word = s[cut..].chars().next().is_some_and(|c| !c.is_whitespace());

    let head = match head.rfind(char::is_whitespace) {
        Some(space) if mid_word && !head[..space].trim().is_empty() => &head[..space],
        _ => head,
    };

    format!("{}{}", head.trim_end(), omission)
}
