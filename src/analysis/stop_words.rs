//! Stop-word marking stage.
//!
//! This stage looks up every token of a document in a configured word list
//! and appends a [`StopWord`](crate::document::AnnotationKind::StopWord)
//! mark over each match. Marks are additive: the token annotations stay in
//! place, and downstream stages (the topic inferencer, the chunker) skip
//! tokens covered by a mark. Includes a default English word list, with
//! support for custom lists loaded from a one-word-per-line file.
//!
//! # Examples
//!
//! ```
//! use xyston::analysis::{Annotator, StopWordRemover, UnicodeSegmenter};
//! use xyston::document::{AnnotationKind, Document};
//!
//! let doc = UnicodeSegmenter::new()
//!     .apply(Document::new("The cat sat.", "en"))
//!     .unwrap();
//! let doc = StopWordRemover::new().apply(doc).unwrap();
//!
//! // "The" is marked as a stop word; the token itself is untouched
//! assert_eq!(doc.annotations_of(AnnotationKind::StopWord).count(), 1);
//! assert_eq!(doc.annotations_of(AnnotationKind::Token).count(), 3);
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use ahash::AHashSet;

use crate::analysis::annotator::Annotator;
use crate::document::{Annotation, AnnotationKind, Document, Span};
use crate::error::{Result, XystonError};

/// Default English stop words list.
///
/// Common English words that typically carry no topical content.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a set.
static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<AHashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A stage that marks stop words in the token stream of a document.
///
/// Matching is case-insensitive. The stage never removes the underlying
/// token annotations; it only appends `StopWord` spans, keeping the
/// document's annotation set monotone.
#[derive(Clone, Debug)]
pub struct StopWordRemover {
    /// The set of stop words to mark, stored lowercase
    stop_words: AHashSet<String>,
}

impl StopWordRemover {
    /// Create a new remover with the default English stop words.
    pub fn new() -> Self {
        StopWordRemover {
            stop_words: DEFAULT_ENGLISH_STOP_WORDS_SET.clone(),
        }
    }

    /// Create a new remover from a list of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use xyston::analysis::StopWordRemover;
    ///
    /// let remover = StopWordRemover::from_words(vec!["foo", "bar"]);
    /// assert!(remover.is_stop_word("FOO"));
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWordRemover {
            stop_words: words
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .collect(),
        }
    }

    /// Create a new remover from a one-word-per-line file.
    ///
    /// Blank lines and lines starting with `#` are skipped. A missing or
    /// unreadable file is a configuration error, reported before any
    /// document is processed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            XystonError::configuration(format!(
                "cannot read stop word list {}: {e}",
                path.display()
            ))
        })?;

        Ok(Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopWordRemover {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator for StopWordRemover {
    fn apply(&self, mut doc: Document) -> Result<Document> {
        let marks: Vec<Span> = doc
            .annotations_of(AnnotationKind::Token)
            .filter_map(|a| a.span())
            .filter(|span| self.is_stop_word(doc.covered_text(span)))
            .copied()
            .collect();

        tracing::debug!(marked = marks.len(), "marked stop words");

        for span in marks {
            doc.push_annotation(Annotation::stop_word(span));
        }

        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "stop_word_remover"
    }
}
