//! Error types for loading and querying posts

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the post pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed front-matter in '{id}': {reason}")]
    MalformedFrontMatter { id: String, reason: String },

    #[error("Invalid metadata in '{id}': {source}")]
    InvalidMetadata {
        id: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Blog post '{0}' not found")]
    DocumentNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("None of the {total} documents could be loaded")]
    NoPostsLoaded { total: usize },

    #[error("IO error when reading `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config `{}`: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid document pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DocumentNotFound("hello-world".to_string());
        assert_eq!(err.to_string(), "Blog post 'hello-world' not found");

        let err = Error::MalformedFrontMatter {
            id: "posts/a.md".to_string(),
            reason: "expected a mapping".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("posts/a.md"));
        assert!(display.contains("expected a mapping"));
    }
}
