//! Document structure flowing through the annotation pipeline.

use serde::{Deserialize, Serialize};

use crate::document::annotation::{Annotation, AnnotationKind, Span};

/// A document is the unit of text flowing through a pipeline.
///
/// It carries the raw text, a language tag, an optional source path for
/// provenance, and a growable collection of annotations. Stages receive the
/// document by value and return it with zero or more annotations appended;
/// existing annotations are never removed or reordered.
///
/// # Examples
///
/// ```
/// use xyston::document::{Annotation, AnnotationKind, Document, Span};
///
/// let mut doc = Document::new("The cat sat.", "en");
/// doc.push_annotation(Annotation::token(Span::new(0, 3)));
///
/// assert_eq!(doc.annotations().len(), 1);
/// assert_eq!(doc.covered_text(&Span::new(0, 3)), "The");
/// assert_eq!(doc.annotations_of(AnnotationKind::Token).count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The raw text of the document
    text: String,

    /// Language tag, e.g. "en"
    language: String,

    /// Where the text came from, if read from the file system
    path: Option<String>,

    /// Annotations in append order
    annotations: Vec<Annotation>,
}

impl Document {
    /// Create a new document with no annotations.
    pub fn new<T: Into<String>, L: Into<String>>(text: T, language: L) -> Self {
        Document {
            text: text.into(),
            language: language.into(),
            path: None,
            annotations: Vec::new(),
        }
    }

    /// Record the file-system path this document was read from.
    pub fn with_path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get the raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the language tag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get the source path, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Append an annotation.
    ///
    /// This is the only way annotations enter a document; there is no
    /// removal or reordering operation.
    pub fn push_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// All annotations in append order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Project the annotations of one kind, in append order.
    ///
    /// Requesting a kind that no stage produced yields an empty iterator,
    /// not an error.
    pub fn annotations_of(
        &self,
        kind: AnnotationKind,
    ) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.iter().filter(move |a| a.kind() == kind)
    }

    /// The document text covered by a span.
    ///
    /// Out-of-range or non-boundary spans yield an empty string rather than
    /// panicking; spans produced by the stages in this crate always lie on
    /// character boundaries of the text they were created from.
    pub fn covered_text(&self, span: &Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the document has no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    language: String,
    path: Option<String>,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Set the document text.
    pub fn text<T: Into<String>>(mut self, text: T) -> Self {
        self.text = text.into();
        self
    }

    /// Set the language tag.
    pub fn language<L: Into<String>>(mut self, language: L) -> Self {
        self.language = language.into();
        self
    }

    /// Set the source path.
    pub fn path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Build the document.
    pub fn build(self) -> Document {
        Document {
            text: self.text,
            language: self.language,
            path: self.path,
            annotations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("Hello world.", "en");
        assert_eq!(doc.text(), "Hello world.");
        assert_eq!(doc.language(), "en");
        assert_eq!(doc.path(), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_document_with_path() {
        let doc = Document::new("text", "en").with_path("texts/a.txt");
        assert_eq!(doc.path(), Some("texts/a.txt"));
    }

    #[test]
    fn test_push_and_project_annotations() {
        let mut doc = Document::new("Hello world.", "en");
        doc.push_annotation(Annotation::token(Span::new(0, 5)));
        doc.push_annotation(Annotation::token(Span::new(6, 11)));
        doc.push_annotation(Annotation::sentence(Span::new(0, 12)));

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.annotations_of(AnnotationKind::Token).count(), 2);
        assert_eq!(doc.annotations_of(AnnotationKind::Sentence).count(), 1);
        assert_eq!(doc.annotations_of(AnnotationKind::NamedEntity).count(), 0);
    }

    #[test]
    fn test_covered_text() {
        let doc = Document::new("Hello world.", "en");
        assert_eq!(doc.covered_text(&Span::new(6, 11)), "world");
        assert_eq!(doc.covered_text(&Span::new(0, 100)), "");
    }

    #[test]
    fn test_builder() {
        let doc = Document::builder()
            .text("Guten Tag.")
            .language("de")
            .path("texts/de.txt")
            .build();

        assert_eq!(doc.text(), "Guten Tag.");
        assert_eq!(doc.language(), "de");
        assert_eq!(doc.path(), Some("texts/de.txt"));
    }

    #[test]
    fn test_append_order_preserved() {
        let mut doc = Document::new("a b c", "en");
        doc.push_annotation(Annotation::token(Span::new(0, 1)));
        doc.push_annotation(Annotation::token(Span::new(2, 3)));
        doc.push_annotation(Annotation::token(Span::new(4, 5)));

        let starts: Vec<usize> = doc
            .annotations()
            .iter()
            .filter_map(|a| a.span().map(|s| s.start))
            .collect();
        assert_eq!(starts, vec![0, 2, 4]);
    }
}
