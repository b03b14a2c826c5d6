//! Sentence and token segmentation stage.
//!
//! This stage appends [`Sentence`](crate::document::AnnotationKind::Sentence)
//! and [`Token`](crate::document::AnnotationKind::Token) spans to a
//! document. Token boundaries follow the Unicode Text Segmentation rules
//! (UAX #29), so international text is handled properly; sentence
//! boundaries are terminal punctuation followed by whitespace or end of
//! text.
//!
//! # Examples
//!
//! ```
//! use xyston::analysis::{Annotator, UnicodeSegmenter};
//! use xyston::document::{AnnotationKind, Document};
//!
//! let segmenter = UnicodeSegmenter::new();
//! let doc = segmenter.apply(Document::new("The cat sat. It purred.", "en")).unwrap();
//!
//! assert_eq!(doc.annotations_of(AnnotationKind::Sentence).count(), 2);
//! assert_eq!(doc.annotations_of(AnnotationKind::Token).count(), 5);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::annotator::Annotator;
use crate::document::{Annotation, Document, Span};
use crate::error::Result;

/// Terminal punctuation runs that can close a sentence.
static SENTENCE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence terminator pattern"));

/// A stage that splits document text into sentence and token spans.
///
/// Token segmentation delegates to the `unicode-segmentation` crate
/// (UAX #29 word boundaries); segments without any alphanumeric character
/// (whitespace, punctuation) are not annotated.
#[derive(Clone, Debug, Default)]
pub struct UnicodeSegmenter;

impl UnicodeSegmenter {
    /// Create a new segmenter.
    pub fn new() -> Self {
        UnicodeSegmenter
    }

    /// Compute sentence spans over the text.
    ///
    /// A sentence ends at a run of `.`, `!` or `?` followed by whitespace
    /// or end of text; trailing text without terminal punctuation forms a
    /// final sentence. Leading and trailing whitespace is excluded from
    /// each span.
    fn sentence_spans(text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut cursor = 0usize;

        for m in SENTENCE_TERMINATOR.find_iter(text) {
            let end = m.end();
            let followed_by_break = text[end..]
                .chars()
                .next()
                .is_none_or(|c| c.is_whitespace());
            if !followed_by_break {
                // e.g. "3.14" or "U.S.A"-internal dots
                continue;
            }
            if let Some(span) = Self::trimmed_span(text, cursor, end) {
                spans.push(span);
            }
            cursor = end;
        }

        if let Some(span) = Self::trimmed_span(text, cursor, text.len()) {
            spans.push(span);
        }

        spans
    }

    /// Compute token spans over the text using UAX #29 word boundaries.
    fn token_spans(text: &str) -> Vec<Span> {
        text.split_word_bound_indices()
            .filter(|(_, word)| word.chars().any(|c| c.is_alphanumeric()))
            .map(|(offset, word)| Span::new(offset, offset + word.len()))
            .collect()
    }

    /// Shrink `[start, end)` to exclude surrounding whitespace.
    fn trimmed_span(text: &str, start: usize, end: usize) -> Option<Span> {
        let slice = &text[start..end];
        let leading = slice.len() - slice.trim_start().len();
        let trailing = slice.len() - slice.trim_end().len();
        let span = Span::new(start + leading, end - trailing);
        if span.is_empty() { None } else { Some(span) }
    }
}

impl Annotator for UnicodeSegmenter {
    fn apply(&self, mut doc: Document) -> Result<Document> {
        let sentences = Self::sentence_spans(doc.text());
        let tokens = Self::token_spans(doc.text());

        tracing::debug!(
            sentences = sentences.len(),
            tokens = tokens.len(),
            "segmented document"
        );

        for span in sentences {
            doc.push_annotation(Annotation::sentence(span));
        }
        for span in tokens {
            doc.push_annotation(Annotation::token(span));
        }

        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "segmenter"
    }
}
