//! Query functions over post collections
//!
//! Every function borrows the collection and returns a new vector; the input
//! is never reordered or modified.

mod related;

use serde::Deserialize;
use std::collections::BTreeSet;

pub use related::{related, relatedness_score};

use crate::content::PostSummary;
use crate::helpers::parse_date;

/// Keep posts in `category` (case-insensitive); `"all"` keeps everything
pub fn filter_by_category(posts: &[PostSummary], category: &str) -> Vec<PostSummary> {
    if category == "all" {
        return posts.to_vec();
    }
    let category = category.to_lowercase();
    posts
        .iter()
        .filter(|p| p.category.to_lowercase() == category)
        .cloned()
        .collect()
}

/// Keep posts carrying `tag` (case-insensitive)
pub fn filter_by_tag(posts: &[PostSummary], tag: &str) -> Vec<PostSummary> {
    let tag = tag.to_lowercase();
    posts
        .iter()
        .filter(|p| p.tags.iter().any(|t| t.to_lowercase() == tag))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over title, description, category and tags
pub fn search(posts: &[PostSummary], query: &str) -> Vec<PostSummary> {
    let query = query.to_lowercase();
    posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
                || p.category.to_lowercase().contains(&query)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Keep featured posts
pub fn featured(posts: &[PostSummary]) -> Vec<PostSummary> {
    posts.iter().filter(|p| p.featured).cloned().collect()
}

/// Sort newest first.
///
/// Parseable dates order chronologically. A date that does not parse is
/// ordered by its raw text instead, so malformed dates land in a stable but
/// not necessarily chronological position.
pub fn sort_by_date(posts: &[PostSummary]) -> Vec<PostSummary> {
    let mut keyed: Vec<(String, &PostSummary)> =
        posts.iter().map(|p| (date_sort_key(&p.date), p)).collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}

fn date_sort_key(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%dT%H:%M:%S%.9f").to_string(),
        None => {
            tracing::debug!("Unparseable date '{}', sorting by raw text", raw);
            raw.to_string()
        }
    }
}

/// Distinct categories, sorted
pub fn unique_categories(posts: &[PostSummary]) -> Vec<String> {
    posts
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct tags, sorted
pub fn unique_tags(posts: &[PostSummary]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Listing parameters as they arrive from a query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<String>,
}

/// A validated listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub featured: bool,
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Normalize raw parameters: blanks are absent, `featured` must be
    /// `"true"`, and a `limit` that is not a positive integer is ignored.
    pub fn from_params(params: &ListParams) -> Self {
        let present = |v: &Option<String>| v.as_ref().filter(|s| !s.is_empty()).cloned();

        let limit = params.limit.as_deref().and_then(|raw| {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    tracing::debug!("Ignoring invalid limit {:?}", raw);
                    None
                }
            }
        });

        Self {
            category: present(&params.category),
            tag: present(&params.tag),
            search: present(&params.search),
            featured: params.featured.as_deref() == Some("true"),
            limit,
        }
    }

    /// Sort by date, then filter by category, tag, search and featured, then limit
    pub fn apply(&self, posts: &[PostSummary]) -> Vec<PostSummary> {
        let mut result = sort_by_date(posts);

        if let Some(category) = &self.category {
            result = filter_by_category(&result, category);
        }
        if let Some(tag) = &self.tag {
            result = filter_by_tag(&result, tag);
        }
        if let Some(query) = &self.search {
            result = search(&result, query);
        }
        if self.featured {
            result = featured(&result);
        }
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }

        result
    }
}
