//! Derived post metadata: excerpt, reading time, emoji

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::config::BlogConfig;
use crate::helpers::{strip_html, truncate};

/// Emoji used when nothing else matches
pub const DEFAULT_EMOJI: &str = "📝";

lazy_static! {
    static ref CATEGORY_EMOJI: HashMap<&'static str, &'static str> = [
        ("web development", "🌐"),
        ("programming", "💻"),
        ("accessibility", "♿"),
        ("javascript", "🟨"),
        ("typescript", "🔷"),
        ("svelte", "🧡"),
        ("react", "⚛️"),
        ("vue", "💚"),
        ("css", "🎨"),
        ("html", "📄"),
        ("node.js", "🟢"),
        ("backend", "⚙️"),
        ("frontend", "🎭"),
        ("fullstack", "🔗"),
        ("design", "🎨"),
        ("ui/ux", "📱"),
        ("tutorial", "📚"),
        ("tips", "💡"),
        ("tools", "🔧"),
        ("productivity", "⚡"),
        ("career", "🚀"),
        ("learning", "🎓"),
        ("opensource", "🔓"),
        ("api", "🔌"),
        ("database", "🗃️"),
        ("security", "🔒"),
        ("performance", "🏃‍♂️"),
        ("testing", "🧪"),
        ("deployment", "🚀"),
        ("mobile", "📱"),
        ("devops", "🔄"),
        ("ai", "🤖"),
        ("machine learning", "🧠"),
        ("data science", "📊"),
    ]
    .into_iter()
    .collect();
}

/// Keyword rules for posts whose category has no emoji, checked in order
const KEYWORD_EMOJI: &[(&[&str], &str)] = &[
    (&["tutorial", "guide", "how to"], "📚"),
    (&["tip", "trick"], "💡"),
    (&["best practice", "pattern"], "⭐"),
    (&["performance", "optimize"], "🚀"),
    (&["debug", "fix", "error"], "🐛"),
    (&["design", "ui", "ux"], "🎨"),
    (&["security", "auth"], "🔒"),
    (&["api", "backend"], "🔌"),
    (&["component", "frontend"], "🧩"),
    (&["test", "testing"], "🧪"),
    (&["review", "comparison"], "📊"),
    (&["news", "update"], "📰"),
    (&["tool", "setup"], "🔧"),
];

/// Knobs for the derived fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveOptions {
    pub excerpt_length: usize,
    pub words_per_minute: usize,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            excerpt_length: 160,
            words_per_minute: 200,
        }
    }
}

impl From<&BlogConfig> for DeriveOptions {
    fn from(config: &BlogConfig) -> Self {
        Self {
            excerpt_length: config.excerpt_length,
            words_per_minute: config.words_per_minute.max(1),
        }
    }
}

/// Estimated reading time in whole minutes, never less than one
pub fn reading_time(text: &str, words_per_minute: usize) -> u32 {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1));
    minutes.max(1) as u32
}

/// Plain-text preview of `text` with tags stripped
pub fn create_excerpt(text: &str, max_length: usize) -> String {
    let plain = strip_html(text);
    truncate(&plain, max_length, None)
}

/// Emoji for a category, or [`DEFAULT_EMOJI`]
pub fn category_emoji(category: &str) -> &'static str {
    CATEGORY_EMOJI
        .get(category.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_EMOJI)
}

/// Category emoji, falling back to keywords in the title and description
pub fn post_emoji(category: &str, title: &str, description: &str) -> &'static str {
    let emoji = category_emoji(category);
    if emoji != DEFAULT_EMOJI {
        return emoji;
    }

    let haystack = format!("{} {}", title, description).to_lowercase();
    KEYWORD_EMOJI
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time("", 200), 1);
        assert_eq!(reading_time("one two three", 200), 1);
        assert_eq!(reading_time(&"word ".repeat(200), 200), 1);
        assert_eq!(reading_time(&"word ".repeat(201), 200), 2);
        assert_eq!(reading_time(&"word ".repeat(250), 200), 2);
        assert_eq!(reading_time("a\n\tb   c", 1), 3);
    }

    #[test]
    fn test_reading_time_monotonic() {
        let mut previous = 0;
        for n in (0..2000).step_by(37) {
            let minutes = reading_time(&"w ".repeat(n), 200);
            assert!(minutes >= 1);
            assert!(minutes >= previous);
            previous = minutes;
        }
    }

    #[test]
    fn test_short_excerpt_is_stripped_text() {
        let html = "<p>Short <em>intro</em></p>\n";
        assert_eq!(create_excerpt(html, 160), "Short intro\n");
    }

    #[test]
    fn test_long_excerpt_bounded() {
        let html = format!("<p>{}</p>", "lorem ipsum dolor ".repeat(30));
        let excerpt = create_excerpt(&html, 160);
        assert!(excerpt.ends_with("..."));
        assert!(!excerpt.contains('<'));
        assert!(excerpt.chars().count() <= 160 + 3);
        assert!(excerpt.trim_end_matches("...").ends_with(|c: char| c.is_alphabetic()));
    }

    #[test]
    fn test_custom_excerpt_length() {
        assert_eq!(create_excerpt("alpha beta gamma", 10), "alpha beta...");
    }

    #[test]
    fn test_category_emoji() {
        assert_eq!(category_emoji("api"), "🔌");
        assert_eq!(category_emoji("Web Development"), "🌐");
        assert_eq!(category_emoji("JavaScript"), "🟨");
        assert_eq!(category_emoji("cooking"), DEFAULT_EMOJI);
        assert_eq!(category_emoji(""), DEFAULT_EMOJI);
    }

    #[test]
    fn test_post_emoji_keywords() {
        assert_eq!(post_emoji("api", "Anything", ""), "🔌");
        assert_eq!(post_emoji("misc", "A Guide to Sourdough", ""), "📚");
        assert_eq!(post_emoji("misc", "Ten tricks", ""), "💡");
        assert_eq!(post_emoji("misc", "Fixing the printer", ""), "🐛");
        assert_eq!(post_emoji("misc", "Plain", "a setup walkthrough"), "🔧");
        assert_eq!(post_emoji("misc", "Plain", "nothing matches"), DEFAULT_EMOJI);
    }

    #[test]
    fn test_keyword_order() {
        // "tutorial" outranks "debug"
        assert_eq!(post_emoji("", "Debugging tutorial", ""), "📚");
        // "build" contains "ui"
        assert_eq!(post_emoji("", "Build systems", ""), "🎨");
    }
}
