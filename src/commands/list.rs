//! List posts, categories and tags

use anyhow::Result;

use crate::helpers::format_date_short;
use crate::query::ListQuery;
use crate::Blog;

/// List posts matching `query`
pub fn run(blog: &Blog, query: &ListQuery) -> Result<()> {
    let posts = blog.list(query)?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        let featured = if post.featured { " *" } else { "" };
        println!(
            "  {} {} {} [{}] {} min{}",
            format_date_short(&post.date),
            post.emoji,
            post.title,
            post.slug,
            post.reading_time,
            featured
        );
    }

    Ok(())
}

/// List the distinct categories or tags
pub fn run_taxonomy(blog: &Blog, kind: &str) -> Result<()> {
    let (label, values) = match kind {
        "category" | "categories" => ("Categories", blog.categories()?),
        "tag" | "tags" => ("Tags", blog.tags()?),
        _ => {
            anyhow::bail!("Unknown type: {}. Available: category, tag", kind);
        }
    };

    println!("{} ({}):", label, values.len());
    for value in values {
        println!("  {}", value);
    }

    Ok(())
}
