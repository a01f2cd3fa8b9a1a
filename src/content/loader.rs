//! Content loader - turns raw documents into posts

use std::collections::HashSet;

use super::derive::DeriveOptions;
use super::source::{slug_from_identifier, DocumentSource, RawDocument};
use super::{MarkdownRenderer, Post, PostSummary};
use crate::error::{Error, Result};
use crate::query;

/// Loads posts from a document source
///
/// A document that fails to load is logged and skipped; it never takes the
/// rest of the batch down with it.
pub struct PostLoader {
    renderer: MarkdownRenderer,
    options: DeriveOptions,
}

impl PostLoader {
    /// Create a new post loader
    pub fn new(renderer: MarkdownRenderer, options: DeriveOptions) -> Self {
        Self { renderer, options }
    }

    /// Load every post as a summary, newest first
    pub fn load_all(&self, source: &dyn DocumentSource) -> Result<Vec<PostSummary>> {
        let ids = source.identifiers()?;
        let total = ids.len();

        let mut seen = HashSet::new();
        let mut posts = Vec::with_capacity(total);

        for id in ids {
            // The first document in source order owns its slug, even when it fails
            let slug = slug_from_identifier(&id);
            if !seen.insert(slug.clone()) {
                tracing::warn!(
                    "Duplicate slug '{}' from {:?}; keeping the first document",
                    slug,
                    id
                );
                continue;
            }

            match source.read(&id).and_then(|doc| self.build(&doc)) {
                Ok(post) => posts.push(post.into_summary()),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", id, e),
            }
        }

        if total > 0 && posts.is_empty() {
            return Err(Error::NoPostsLoaded { total });
        }

        tracing::debug!("Loaded {} of {} documents", posts.len(), total);

        Ok(query::sort_by_date(&posts))
    }

    /// Load a single post, including its rendered content
    pub fn load_post(&self, source: &dyn DocumentSource, slug: &str) -> Result<Post> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(Error::InvalidRequest("Slug is required".to_string()));
        }

        let doc = source
            .find(slug)?
            .ok_or_else(|| Error::DocumentNotFound(slug.to_string()))?;

        self.build(&doc)
    }

    /// Parse, validate and derive one post
    pub fn build(&self, doc: &RawDocument) -> Result<Post> {
        let parsed = self.renderer.parse(doc)?;
        let meta = parsed.front_matter.to_metadata(&doc.id)?;
        Ok(Post::build(
            doc.slug(),
            meta,
            parsed.html,
            &doc.text,
            self.options,
        ))
    }
}

impl Default for PostLoader {
    fn default() -> Self {
        Self::new(MarkdownRenderer::new(), DeriveOptions::default())
    }
}
