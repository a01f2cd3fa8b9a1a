//! notizen: markdown blog posts as structured, queryable data
//!
//! Markdown documents with YAML front-matter are parsed into posts with
//! rendered HTML, an excerpt, a reading time and a category emoji. Post
//! collections can be filtered, searched, sorted and ranked for related
//! posts. Nothing is cached: every load reads the sources again.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod query;
pub mod server;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use content::{
    DeriveOptions, DirectorySource, DocumentSource, MarkdownRenderer, Post, PostLoader,
    PostSummary,
};
use query::ListQuery;

/// The blog: configuration, a document source and a post loader
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    source: Box<dyn DocumentSource>,
    loader: PostLoader,
}

impl Blog {
    /// Open a blog rooted at `base_dir`, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let source = DirectorySource::new(base_dir.join(&config.content_dir));
        Ok(Self::with_source(config, base_dir, Box::new(source)))
    }

    /// Build a blog over any document source
    pub fn with_source(
        config: config::BlogConfig,
        base_dir: PathBuf,
        source: Box<dyn DocumentSource>,
    ) -> Self {
        let renderer = MarkdownRenderer::with_options(config.highlight.clone());
        let loader = PostLoader::new(renderer, DeriveOptions::from(&config));
        Self {
            config,
            base_dir,
            source,
            loader,
        }
    }

    /// All posts, newest first
    pub fn posts(&self) -> Result<Vec<PostSummary>> {
        self.loader.load_all(self.source.as_ref())
    }

    /// One post with its rendered content
    pub fn post(&self, slug: &str) -> Result<Post> {
        self.loader.load_post(self.source.as_ref(), slug)
    }

    /// Posts matching a listing request
    pub fn list(&self, query: &ListQuery) -> Result<Vec<PostSummary>> {
        Ok(query.apply(&self.posts()?))
    }

    /// Posts related to `slug`; `limit` defaults to the configured value
    pub fn related(&self, slug: &str, limit: Option<usize>) -> Result<Vec<PostSummary>> {
        let reference = self.post(slug)?.into_summary();
        let posts = self.posts()?;
        let limit = limit.unwrap_or(self.config.related_limit);
        Ok(query::related(&posts, &reference, limit))
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(query::unique_categories(&self.posts()?))
    }

    pub fn tags(&self) -> Result<Vec<String>> {
        Ok(query::unique_tags(&self.posts()?))
    }
}
