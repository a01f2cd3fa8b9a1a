//! Document sources - where raw markdown comes from

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A raw markdown document as supplied by a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Source identifier, usually a path
    pub id: String,
    /// Front-matter block followed by the markdown body
    pub text: String,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn slug(&self) -> String {
        slug_from_identifier(&self.id)
    }
}

/// Strip the directory path and the trailing extension from an identifier
pub fn slug_from_identifier(id: &str) -> String {
    let name = id.rsplit(['/', '\\']).next().unwrap_or(id);
    match name.rfind('.') {
        Some(pos) if pos > 0 => name[..pos].to_string(),
        _ => name.to_string(),
    }
}

/// Supplies raw documents to the loader
pub trait DocumentSource: Send + Sync {
    /// Identifiers of every document, in a stable order
    fn identifiers(&self) -> Result<Vec<String>>;

    /// Read one document by identifier
    fn read(&self, id: &str) -> Result<RawDocument>;

    /// Look a document up by slug
    fn find(&self, slug: &str) -> Result<Option<RawDocument>> {
        for id in self.identifiers()? {
            if slug_from_identifier(&id) == slug {
                return self.read(&id).map(Some);
            }
        }
        Ok(None)
    }
}

/// Markdown files directly inside a content directory
pub struct DirectorySource {
    dir: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: "md".to_string(),
        }
    }

    fn pattern(&self) -> String {
        let dir = glob::Pattern::escape(&self.dir.to_string_lossy());
        format!("{}/*.{}", dir, self.extension)
    }
}

impl DocumentSource for DirectorySource {
    fn identifiers(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut ids: Vec<String> = glob::glob(&self.pattern())?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        ids.sort();

        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<RawDocument> {
        let text = fs::read_to_string(id).map_err(|source| Error::Io {
            path: PathBuf::from(id),
            source,
        })?;
        Ok(RawDocument::new(id, text))
    }

    fn find(&self, slug: &str) -> Result<Option<RawDocument>> {
        if slug.contains(['/', '\\']) || slug.contains("..") {
            return Ok(None);
        }

        let path = self.dir.join(format!("{}.{}", slug, self.extension));
        if !path.is_file() {
            return Ok(None);
        }

        self.read(&path.to_string_lossy()).map(Some)
    }
}

/// Documents held in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<RawDocument>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(RawDocument::new(id, text));
        self
    }
}

impl DocumentSource for MemorySource {
    fn identifiers(&self) -> Result<Vec<String>> {
        Ok(self.documents.iter().map(|d| d.id.clone()).collect())
    }

    fn read(&self, id: &str) -> Result<RawDocument> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_identifier() {
        assert_eq!(slug_from_identifier("/static/content/blog/hello-world.md"), "hello-world");
        assert_eq!(slug_from_identifier("notes.v2.md"), "notes.v2");
        assert_eq!(slug_from_identifier("C:\\blog\\post.md"), "post");
        assert_eq!(slug_from_identifier("README"), "README");
        assert_eq!(slug_from_identifier(".hidden"), ".hidden");
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-post.md"), "B").unwrap();
        fs::write(dir.path().join("a-post.md"), "A").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.md"), "ignored").unwrap();

        let source = DirectorySource::new(dir.path());
        let ids = source.identifiers().unwrap();
        let slugs: Vec<_> = ids.iter().map(|id| slug_from_identifier(id)).collect();
        assert_eq!(slugs, vec!["a-post", "b-post"]);

        let doc = source.find("b-post").unwrap().unwrap();
        assert_eq!(doc.text, "B");
        assert_eq!(doc.slug(), "b-post");

        assert!(source.find("missing").unwrap().is_none());
        assert!(source.find("../b-post").unwrap().is_none());
        assert!(source.find("nested/deep").unwrap().is_none());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path().join("nope"));
        assert!(source.identifiers().unwrap().is_empty());
    }

    #[test]
    fn test_memory_source_find() {
        let source = MemorySource::new()
            .with("blog/first.md", "one")
            .with("blog/second.md", "two");
        let doc = source.find("second").unwrap().unwrap();
        assert_eq!(doc.text, "two");
        assert!(source.find("third").unwrap().is_none());
    }
}
