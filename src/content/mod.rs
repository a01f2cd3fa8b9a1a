//! Content module - documents, front-matter, rendering and posts

pub mod derive;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod source;

pub use derive::DeriveOptions;
pub use frontmatter::{FrontMatter, PostMetadata};
pub use loader::PostLoader;
pub use markdown::{heading_id, resolve_language, MarkdownRenderer, ParsedDocument};
pub use post::{Post, PostSummary};
pub use source::{DirectorySource, DocumentSource, MemorySource, RawDocument};
