//! Post models

use serde::{Deserialize, Serialize};

use super::derive::{self, DeriveOptions};
use super::frontmatter::PostMetadata;

/// A post as returned by listings: everything except the rendered body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// URL-safe identifier, derived from the source filename
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Raw date string from front-matter
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub excerpt: String,
    /// Minutes
    pub reading_time: u32,
    pub emoji: String,
}

/// A full post, including rendered HTML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,
    /// Rendered HTML content
    pub content: String,
}

impl Post {
    /// Assemble a post from its parts, computing the derived fields
    pub fn build(
        slug: String,
        meta: PostMetadata,
        content: String,
        raw: &str,
        options: DeriveOptions,
    ) -> Self {
        let excerpt_source = if meta.description.trim().is_empty() {
            content.as_str()
        } else {
            meta.description.as_str()
        };
        let excerpt = derive::create_excerpt(excerpt_source, options.excerpt_length);
        let reading_time = derive::reading_time(raw, options.words_per_minute);
        let emoji = derive::post_emoji(&meta.category, &meta.title, &meta.description).to_string();

        let summary = PostSummary {
            slug,
            title: meta.title,
            description: meta.description,
            date: meta.date,
            category: meta.category,
            tags: meta.tags,
            author: meta.author,
            featured: meta.featured,
            image: meta.image,
            excerpt,
            reading_time,
            emoji,
        };

        Self { summary, content }
    }

    pub fn slug(&self) -> &str {
        &self.summary.slug
    }

    /// Drop the rendered body
    pub fn into_summary(self) -> PostSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PostMetadata {
        PostMetadata {
            title: "Intro to APIs".to_string(),
            category: "api".to_string(),
            tags: vec!["rest".to_string(), "http".to_string()],
            featured: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_uses_content_for_excerpt() {
        let post = Post::build(
            "intro".to_string(),
            meta(),
            "<p>Body text</p>\n".to_string(),
            "Body text",
            DeriveOptions::default(),
        );
        assert_eq!(post.summary.excerpt, "Body text\n");
        assert_eq!(post.summary.reading_time, 1);
        assert_eq!(post.summary.emoji, "🔌");
        assert_eq!(post.slug(), "intro");
    }

    #[test]
    fn test_build_prefers_description() {
        let mut m = meta();
        m.description = "A <b>short</b> summary".to_string();
        let post = Post::build(
            "intro".to_string(),
            m,
            "<p>Body</p>".to_string(),
            "Body",
            DeriveOptions::default(),
        );
        assert_eq!(post.summary.excerpt, "A short summary");
    }

    #[test]
    fn test_json_shape() {
        let post = Post::build(
            "intro".to_string(),
            meta(),
            "<p>x</p>".to_string(),
            "x",
            DeriveOptions::default(),
        );
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["slug"], "intro");
        assert_eq!(json["readingTime"], 1);
        assert_eq!(json["content"], "<p>x</p>");
        assert_eq!(json["tags"][0], "rest");
        assert!(json.get("image").is_none());

        let summary = serde_json::to_value(post.into_summary()).unwrap();
        assert!(summary.get("content").is_none());
        assert_eq!(summary["featured"], true);
    }
}
