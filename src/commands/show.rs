//! Show a single post

use anyhow::Result;
use chrono::Utc;

use crate::helpers::{format_date, format_date_relative, is_recent};
use crate::Blog;

/// Print a post's metadata, optionally its HTML, and its related posts
pub fn run(blog: &Blog, slug: &str, html: bool) -> Result<()> {
    let post = blog.post(slug)?;
    let meta = &post.summary;
    let now = Utc::now();

    println!("{} {}", meta.emoji, meta.title);
    if !meta.date.is_empty() {
        let new_badge = if is_recent(&meta.date, 7, now) { " (new)" } else { "" };
        println!(
            "  {} - {}{}",
            format_date(&meta.date),
            format_date_relative(&meta.date, now),
            new_badge
        );
    }
    if !meta.author.is_empty() {
        println!("  by {}", meta.author);
    }
    if !meta.category.is_empty() {
        println!("  category: {}", meta.category);
    }
    if !meta.tags.is_empty() {
        println!("  tags: {}", meta.tags.join(", "));
    }
    println!("  {} min read", meta.reading_time);
    println!();
    println!("{}", meta.excerpt.trim());

    if html {
        println!();
        println!("{}", post.content);
    }

    let related = blog.related(slug, None)?;
    if !related.is_empty() {
        println!();
        println!("Related:");
        for other in related {
            println!("  {} {} [{}]", other.emoji, other.title, other.slug);
        }
    }

    Ok(())
}
