//! Annotation types attached to documents by pipeline stages.
//!
//! An [`Annotation`] is a typed piece of derived information produced by a
//! stage and owned by exactly one [`Document`](crate::document::Document).
//! Every annotation reports its [`AnnotationKind`], which terminal writers
//! and downstream stages use to project the annotations they care about.
//!
//! # Examples
//!
//! Creating a span-bearing annotation:
//!
//! ```
//! use xyston::document::{Annotation, AnnotationKind, Span};
//!
//! let annotation = Annotation::token(Span::new(0, 5));
//! assert_eq!(annotation.kind(), AnnotationKind::Token);
//! assert_eq!(annotation.span(), Some(&Span::new(0, 5)));
//! ```
//!
//! A document-level annotation has no span:
//!
//! ```
//! use xyston::document::Annotation;
//!
//! let annotation = Annotation::topic_distribution(vec![0.5, 0.3, 0.2]);
//! assert_eq!(annotation.span(), None);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A byte range into the text of the document that owns the annotation.
///
/// `start` is inclusive, `end` is exclusive, both are byte offsets into
/// the document text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset where the annotated region starts
    pub start: usize,
    /// Byte offset where the annotated region ends (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if this span fully contains another.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Classification of annotation content.
///
/// Each stage owns the kinds it produces; no kind is produced by more than
/// one stage in a configured pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// A sentence span produced by the segmenter
    Sentence,
    /// A token span produced by the segmenter
    Token,
    /// A stop-word mark over a token span
    StopWord,
    /// A named-entity span with a label
    NamedEntity,
    /// A shallow phrase span produced by the chunker
    Phrase,
    /// A document-level topic weight vector
    TopicDistribution,
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnnotationKind::Sentence => "sentence",
            AnnotationKind::Token => "token",
            AnnotationKind::StopWord => "stop_word",
            AnnotationKind::NamedEntity => "named_entity",
            AnnotationKind::Phrase => "phrase",
            AnnotationKind::TopicDistribution => "topic_distribution",
        };
        write!(f, "{name}")
    }
}

/// A single annotation attached to a document by a stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// A sentence boundary span
    Sentence {
        /// Covered region of the document text
        span: Span,
    },
    /// A word token span
    Token {
        /// Covered region of the document text
        span: Span,
    },
    /// A stop-word mark; always covers an existing token span
    StopWord {
        /// Covered region of the document text
        span: Span,
    },
    /// A recognized named entity
    NamedEntity {
        /// Covered region of the document text
        span: Span,
        /// Entity label, e.g. "PERSON" or "LOCATION"
        label: String,
    },
    /// A shallow phrase chunk
    Phrase {
        /// Covered region of the document text
        span: Span,
    },
    /// Per-topic weights for the whole document; one entry per model topic
    TopicDistribution {
        /// Normalized topic weights
        weights: Vec<f64>,
    },
}

impl Annotation {
    /// Create a sentence annotation.
    pub fn sentence(span: Span) -> Self {
        Annotation::Sentence { span }
    }

    /// Create a token annotation.
    pub fn token(span: Span) -> Self {
        Annotation::Token { span }
    }

    /// Create a stop-word mark.
    pub fn stop_word(span: Span) -> Self {
        Annotation::StopWord { span }
    }

    /// Create a named-entity annotation.
    pub fn named_entity<S: Into<String>>(span: Span, label: S) -> Self {
        Annotation::NamedEntity {
            span,
            label: label.into(),
        }
    }

    /// Create a phrase annotation.
    pub fn phrase(span: Span) -> Self {
        Annotation::Phrase { span }
    }

    /// Create a topic-distribution annotation.
    pub fn topic_distribution(weights: Vec<f64>) -> Self {
        Annotation::TopicDistribution { weights }
    }

    /// Get the kind of this annotation.
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Sentence { .. } => AnnotationKind::Sentence,
            Annotation::Token { .. } => AnnotationKind::Token,
            Annotation::StopWord { .. } => AnnotationKind::StopWord,
            Annotation::NamedEntity { .. } => AnnotationKind::NamedEntity,
            Annotation::Phrase { .. } => AnnotationKind::Phrase,
            Annotation::TopicDistribution { .. } => AnnotationKind::TopicDistribution,
        }
    }

    /// Get the covered span, if this annotation is span-bearing.
    ///
    /// Document-level annotations (topic distributions) return `None`.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Annotation::Sentence { span }
            | Annotation::Token { span }
            | Annotation::StopWord { span }
            | Annotation::NamedEntity { span, .. }
            | Annotation::Phrase { span } => Some(span),
            Annotation::TopicDistribution { .. } => None,
        }
    }

    /// Get the entity label, if this is a named-entity annotation.
    pub fn label(&self) -> Option<&str> {
        match self {
            Annotation::NamedEntity { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }

    /// Get the topic weights, if this is a topic-distribution annotation.
    pub fn weights(&self) -> Option<&[f64]> {
        match self {
            Annotation::TopicDistribution { weights } => Some(weights.as_slice()),
            _ => None,
        }
    }
}
