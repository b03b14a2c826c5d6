//! Document sources feeding the pipeline.
//!
//! A [`DocumentSource`] produces documents one at a time. Two sources are
//! provided: [`TextFileSource`] reads every file matching a glob pattern
//! (batch mode), and [`JsonSource`] wraps a single JSON object with
//! `language` and `text` fields (single-document mode). End of input is
//! signalled by `Ok(None)`, never by an error.

use std::fs;
use std::path::PathBuf;

use crate::document::Document;
use crate::error::{Result, XystonError};

/// Trait for producers of documents.
///
/// Sources are not required to be restartable; a finished source keeps
/// returning `Ok(None)`.
pub trait DocumentSource {
    /// Produce the next document, or `Ok(None)` when exhausted.
    fn next_document(&mut self) -> Result<Option<Document>>;
}

/// In-memory source, mainly useful in tests and benchmarks.
impl DocumentSource for std::vec::IntoIter<Document> {
    fn next_document(&mut self) -> Result<Option<Document>> {
        Ok(self.next())
    }
}

/// A source that reads documents from files matching a glob pattern.
///
/// The pattern is expanded once at construction; a malformed pattern is a
/// configuration error, while a pattern matching nothing yields an empty
/// sequence. Each matching file becomes one document carrying its path.
///
/// # Examples
///
/// ```no_run
/// use xyston::pipeline::{DocumentSource, TextFileSource};
///
/// let mut source = TextFileSource::new("texts/*", "en").unwrap();
/// while let Some(doc) = source.next_document().unwrap() {
///     println!("{}: {} bytes", doc.path().unwrap_or("?"), doc.text().len());
/// }
/// ```
#[derive(Debug)]
pub struct TextFileSource {
    paths: std::vec::IntoIter<PathBuf>,
    language: String,
}

impl TextFileSource {
    /// Create a source over all files matching `pattern`.
    pub fn new<L: Into<String>>(pattern: &str, language: L) -> Result<Self> {
        let entries = glob::glob(pattern).map_err(|e| {
            XystonError::configuration(format!("invalid source pattern '{pattern}': {e}"))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                XystonError::configuration(format!("cannot list source '{pattern}': {e}"))
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }

        tracing::debug!(pattern, files = paths.len(), "expanded document source");

        Ok(TextFileSource {
            paths: paths.into_iter(),
            language: language.into(),
        })
    }

    /// Number of files remaining.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl DocumentSource for TextFileSource {
    fn next_document(&mut self) -> Result<Option<Document>> {
        let path = match self.paths.next() {
            Some(path) => path,
            None => return Ok(None),
        };
        let text = fs::read_to_string(&path)?;
        Ok(Some(
            Document::new(text, self.language.clone()).with_path(path.display().to_string()),
        ))
    }
}

/// A source wrapping one JSON document object.
///
/// The object must carry string fields `language` and `text`; anything
/// else is a configuration error raised at construction, before any stage
/// runs.
///
/// # Examples
///
/// ```
/// use xyston::pipeline::{DocumentSource, JsonSource};
///
/// let mut source = JsonSource::new(r#"{"language": "en", "text": "The cat sat."}"#).unwrap();
///
/// let doc = source.next_document().unwrap().unwrap();
/// assert_eq!(doc.language(), "en");
/// assert!(source.next_document().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct JsonSource {
    doc: Option<Document>,
}

impl JsonSource {
    /// Parse a single-document JSON string.
    pub fn new(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| XystonError::configuration(format!("malformed document JSON: {e}")))?;

        let object = value
            .as_object()
            .ok_or_else(|| XystonError::configuration("document JSON must be an object"))?;

        let language = object
            .get("language")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                XystonError::configuration("document JSON is missing string field 'language'")
            })?;
        let text = object.get("text").and_then(|v| v.as_str()).ok_or_else(|| {
            XystonError::configuration("document JSON is missing string field 'text'")
        })?;

        Ok(JsonSource {
            doc: Some(Document::new(text, language)),
        })
    }

    /// Read and parse a single-document JSON file.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            XystonError::configuration(format!(
                "cannot read document source {}: {e}",
                path.display()
            ))
        })?;
        Self::new(&json)
    }
}

impl DocumentSource for JsonSource {
    fn next_document(&mut self) -> Result<Option<Document>> {
        Ok(self.doc.take())
    }
}
