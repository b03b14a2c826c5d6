//! Named-entity recognition stage backed by a gazetteer.
//!
//! The recognizer matches token sequences against a phrase table mapping
//! surface forms to entity labels and appends a
//! [`NamedEntity`](crate::document::AnnotationKind::NamedEntity) annotation
//! for every match, preferring the longest match at each position. The
//! table is the external model: it is loaded from a JSON file of the form
//! `{"PERSON": ["Barack Obama"], "LOCATION": ["Berlin"]}` at construction
//! time, and a small built-in demo table ships with the crate.
//!
//! # Examples
//!
//! ```
//! use xyston::analysis::{Annotator, GazetteerRecognizer, UnicodeSegmenter};
//! use xyston::document::{AnnotationKind, Document};
//!
//! let recognizer = GazetteerRecognizer::from_entries(vec![
//!     ("Barack Obama", "PERSON"),
//!     ("Berlin", "LOCATION"),
//! ]);
//!
//! let doc = UnicodeSegmenter::new()
//!     .apply(Document::new("Barack Obama visited Berlin.", "en"))
//!     .unwrap();
//! let doc = recognizer.apply(doc).unwrap();
//!
//! let labels: Vec<_> = doc
//!     .annotations_of(AnnotationKind::NamedEntity)
//!     .filter_map(|a| a.label())
//!     .collect();
//! assert_eq!(labels, vec!["PERSON", "LOCATION"]);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::analysis::annotator::Annotator;
use crate::document::{Annotation, AnnotationKind, Document, Span};
use crate::error::{Result, XystonError};

/// Built-in demo gazetteer, analogous to the default models the original
/// recognizers ship with. Real deployments load their own table with
/// [`GazetteerRecognizer::from_path`].
const DEFAULT_GAZETTEER: &[(&str, &str)] = &[
    ("Barack Obama", "PERSON"),
    ("Angela Merkel", "PERSON"),
    ("Albert Einstein", "PERSON"),
    ("Marie Curie", "PERSON"),
    ("Berlin", "LOCATION"),
    ("Paris", "LOCATION"),
    ("Germany", "LOCATION"),
    ("France", "LOCATION"),
    ("United States", "LOCATION"),
    ("New York", "LOCATION"),
    ("United Nations", "ORGANIZATION"),
    ("European Union", "ORGANIZATION"),
    ("Stanford University", "ORGANIZATION"),
];

/// A stage that recognizes named entities by gazetteer lookup.
///
/// Matching is case-sensitive and token-aligned: a phrase matches a run of
/// consecutive token annotations whose covered texts equal the phrase
/// words. At each token position the longest matching phrase wins and
/// matching resumes after it, so overlapping entities are never produced.
#[derive(Clone, Debug)]
pub struct GazetteerRecognizer {
    /// Phrase words joined by a single space, mapped to the entity label
    phrases: AHashMap<String, String>,
    /// Longest phrase length in tokens
    max_tokens: usize,
}

impl GazetteerRecognizer {
    /// Create a recognizer with the built-in demo gazetteer.
    pub fn new() -> Self {
        Self::from_entries(DEFAULT_GAZETTEER.iter().copied())
    }

    /// Create a recognizer from `(phrase, label)` entries.
    pub fn from_entries<I, P, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: Into<String>,
    {
        let mut phrases = AHashMap::new();
        let mut max_tokens = 0;

        for (phrase, label) in entries {
            let phrase = phrase.into();
            let token_count = phrase.split_whitespace().count();
            if token_count == 0 {
                continue;
            }
            max_tokens = max_tokens.max(token_count);
            let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
            phrases.insert(normalized, label.into());
        }

        GazetteerRecognizer {
            phrases,
            max_tokens,
        }
    }

    /// Load a gazetteer model from a JSON file mapping labels to phrase
    /// lists.
    ///
    /// A missing or malformed file is a configuration error, reported
    /// before any document is processed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            XystonError::configuration(format!(
                "cannot read gazetteer model {}: {e}",
                path.display()
            ))
        })?;

        let table: HashMap<String, Vec<String>> =
            serde_json::from_str(&contents).map_err(|e| {
                XystonError::configuration(format!(
                    "malformed gazetteer model {}: {e}",
                    path.display()
                ))
            })?;

        Ok(Self::from_entries(table.into_iter().flat_map(
            |(label, phrases)| {
                phrases
                    .into_iter()
                    .map(move |phrase| (phrase, label.clone()))
            },
        )))
    }

    /// Number of phrases in the gazetteer.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Check if the gazetteer is empty.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Look up a normalized phrase.
    fn label_of(&self, phrase: &str) -> Option<&str> {
        self.phrases.get(phrase).map(|s| s.as_str())
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator for GazetteerRecognizer {
    fn apply(&self, mut doc: Document) -> Result<Document> {
        let tokens: Vec<Span> = doc
            .annotations_of(AnnotationKind::Token)
            .filter_map(|a| a.span())
            .copied()
            .collect();

        let mut entities: Vec<(Span, String)> = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let mut matched_len = 0;
            let mut matched_label = None;

            let window_max = self.max_tokens.min(tokens.len() - i);
            for len in (1..=window_max).rev() {
                let phrase = tokens[i..i + len]
                    .iter()
                    .map(|span| doc.covered_text(span))
                    .collect::<Vec<_>>()
                    .join(" ");
                if let Some(label) = self.label_of(&phrase) {
                    matched_len = len;
                    matched_label = Some(label.to_string());
                    break;
                }
            }

            match matched_label {
                Some(label) => {
                    let span = Span::new(tokens[i].start, tokens[i + matched_len - 1].end);
                    entities.push((span, label));
                    i += matched_len;
                }
                None => i += 1,
            }
        }

        tracing::debug!(entities = entities.len(), "recognized named entities");

        for (span, label) in entities {
            doc.push_annotation(Annotation::named_entity(span, label));
        }

        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "gazetteer_recognizer"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::analysis::segmenter::UnicodeSegmenter;

    fn recognize(text: &str, recognizer: &GazetteerRecognizer) -> Document {
        let doc = UnicodeSegmenter::new()
            .apply(Document::new(text, "en"))
            .unwrap();
        recognizer.apply(doc).unwrap()
    }

    fn entity_texts(doc: &Document) -> Vec<(&str, &str)> {
        doc.annotations_of(AnnotationKind::NamedEntity)
            .map(|a| (doc.covered_text(a.span().unwrap()), a.label().unwrap()))
            .collect()
    }

    #[test]
    fn test_single_and_multi_token_entities() {
        let doc = recognize("Barack Obama visited Berlin.", &GazetteerRecognizer::new());
        assert_eq!(
            entity_texts(&doc),
            vec![("Barack Obama", "PERSON"), ("Berlin", "LOCATION")]
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let recognizer = GazetteerRecognizer::from_entries(vec![
            ("New York", "LOCATION"),
            ("New York Times", "ORGANIZATION"),
        ]);
        let doc = recognize("The New York Times reported.", &recognizer);
        assert_eq!(
            entity_texts(&doc),
            vec![("New York Times", "ORGANIZATION")]
        );
    }

    #[test]
    fn test_case_sensitive_matching() {
        let doc = recognize("He went to berlin.", &GazetteerRecognizer::new());
        assert!(entity_texts(&doc).is_empty());
    }

    #[test]
    fn test_no_tokens_no_entities() {
        let recognizer = GazetteerRecognizer::new();
        let doc = recognizer.apply(Document::new("Berlin", "en")).unwrap();
        // Without a segmenter run first there are no token annotations to match
        assert!(doc.annotations_of(AnnotationKind::NamedEntity).count() == 0);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"PERSON": ["Ada Lovelace"], "LOCATION": ["London"]}}"#
        )
        .unwrap();

        let recognizer = GazetteerRecognizer::from_path(file.path()).unwrap();
        assert_eq!(recognizer.len(), 2);

        let doc = recognize("Ada Lovelace lived in London.", &recognizer);
        assert_eq!(
            entity_texts(&doc),
            vec![("Ada Lovelace", "PERSON"), ("London", "LOCATION")]
        );
    }

    #[test]
    fn test_missing_model_is_configuration_error() {
        let err = GazetteerRecognizer::from_path("no/such/model.json").unwrap_err();
        assert!(matches!(err, XystonError::Configuration(_)));
    }

    #[test]
    fn test_malformed_model_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let err = GazetteerRecognizer::from_path(file.path()).unwrap_err();
        assert!(matches!(err, XystonError::Configuration(_)));
    }

    #[test]
    fn test_stage_name() {
        assert_eq!(GazetteerRecognizer::new().name(), "gazetteer_recognizer");
    }
}
