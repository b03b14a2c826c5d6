//! Shallow phrase chunking stage.
//!
//! The chunker appends [`Phrase`](crate::document::AnnotationKind::Phrase)
//! spans: maximal runs of content tokens inside one sentence. A run is
//! broken at function words (articles, prepositions, pronouns,
//! auxiliaries) and at capitalization transitions, so a proper-noun
//! sequence like "Barack Obama" forms one phrase while the lowercase verb
//! after it starts another. This is a lexicon-driven stand-in for the
//! noun-phrase projection of a full parser.
//!
//! # Examples
//!
//! ```
//! use xyston::analysis::{Annotator, PhraseChunker, UnicodeSegmenter};
//! use xyston::document::{AnnotationKind, Document};
//!
//! let doc = UnicodeSegmenter::new()
//!     .apply(Document::new("The quick brown fox jumped.", "en"))
//!     .unwrap();
//! let doc = PhraseChunker::new().apply(doc).unwrap();
//!
//! let phrases: Vec<_> = doc
//!     .annotations_of(AnnotationKind::Phrase)
//!     .map(|a| doc.covered_text(a.span().unwrap()))
//!     .collect();
//! assert_eq!(phrases, vec!["quick brown fox jumped"]);
//! ```

use std::sync::LazyLock;

use ahash::AHashSet;

use crate::analysis::annotator::Annotator;
use crate::document::{Annotation, AnnotationKind, Document, Span};
use crate::error::Result;

/// Closed-class English words that break phrase runs.
const FUNCTION_WORDS: &[&str] = &[
    // articles and determiners
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "no",
    // prepositions
    "at", "by", "for", "from", "in", "into", "of", "off", "on", "onto", "out", "over", "to",
    "under", "up", "with", "without", "about", "after", "before", "between", "through",
    // conjunctions
    "and", "but", "or", "nor", "so", "yet", "because", "although", "while", "if", "than",
    // pronouns
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "who", "whom", "which", "what",
    // auxiliaries and copulas
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "has", "have",
    "had", "will", "would", "can", "could", "shall", "should", "may", "might", "must", "not",
];

static FUNCTION_WORDS_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| FUNCTION_WORDS.iter().copied().collect());

/// Capitalization class of a token, used to split phrase runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CaseClass {
    /// First character is uppercase
    Capitalized,
    /// Everything else (lowercase words, numbers)
    Lower,
}

impl CaseClass {
    fn of(word: &str) -> Self {
        if word.chars().next().is_some_and(|c| c.is_uppercase()) {
            CaseClass::Capitalized
        } else {
            CaseClass::Lower
        }
    }
}

/// A stage that chunks sentences into shallow phrases.
///
/// A phrase is a maximal run of consecutive content tokens within one
/// sentence; function words and stop-word marks end the current run, and a
/// change of capitalization class between adjacent tokens starts a new
/// one.
#[derive(Clone, Debug, Default)]
pub struct PhraseChunker;

impl PhraseChunker {
    /// Create a new chunker.
    pub fn new() -> Self {
        PhraseChunker
    }

    /// Check if a token text breaks phrase runs.
    fn is_function_word(word: &str) -> bool {
        FUNCTION_WORDS_SET.contains(word.to_lowercase().as_str())
    }
}

impl Annotator for PhraseChunker {
    fn apply(&self, mut doc: Document) -> Result<Document> {
        let sentences: Vec<Span> = doc
            .annotations_of(AnnotationKind::Sentence)
            .filter_map(|a| a.span())
            .copied()
            .collect();
        let tokens: Vec<Span> = doc
            .annotations_of(AnnotationKind::Token)
            .filter_map(|a| a.span())
            .copied()
            .collect();
        let stop_marks: AHashSet<Span> = doc
            .annotations_of(AnnotationKind::StopWord)
            .filter_map(|a| a.span())
            .copied()
            .collect();

        let mut phrases: Vec<Span> = Vec::new();
        for sentence in &sentences {
            let mut run: Vec<Span> = Vec::new();
            let mut run_class = CaseClass::Lower;

            for token in tokens.iter().filter(|t| sentence.contains(t)) {
                let text = doc.covered_text(token);
                let breaks = Self::is_function_word(text) || stop_marks.contains(token);
                let class = CaseClass::of(text);

                if breaks || (!run.is_empty() && class != run_class) {
                    if !run.is_empty() {
                        phrases.push(Span::new(run[0].start, run[run.len() - 1].end));
                        run.clear();
                    }
                }
                if !breaks {
                    run_class = class;
                    run.push(*token);
                }
            }
            if !run.is_empty() {
                phrases.push(Span::new(run[0].start, run[run.len() - 1].end));
            }
        }

        tracing::debug!(phrases = phrases.len(), "chunked phrases");

        for span in phrases {
            doc.push_annotation(Annotation::phrase(span));
        }

        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "phrase_chunker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::segmenter::UnicodeSegmenter;
    use crate::analysis::stop_words::StopWordRemover;

    fn chunk(text: &str) -> Vec<String> {
        let doc = UnicodeSegmenter::new()
            .apply(Document::new(text, "en"))
            .unwrap();
        let doc = PhraseChunker::new().apply(doc).unwrap();
        doc.annotations_of(AnnotationKind::Phrase)
            .map(|a| doc.covered_text(a.span().unwrap()).to_string())
            .collect()
    }

    #[test]
    fn test_function_words_break_runs() {
        assert_eq!(
            chunk("The quick brown fox jumped over the lazy dog."),
            vec!["quick brown fox jumped", "lazy dog"]
        );
    }

    #[test]
    fn test_capitalization_transition_splits() {
        assert_eq!(
            chunk("Barack Obama visited Berlin."),
            vec!["Barack Obama", "visited", "Berlin"]
        );
    }

    #[test]
    fn test_proper_noun_run_stays_together() {
        assert_eq!(chunk("New York City never sleeps."), vec![
            "New York City",
            "never sleeps"
        ]);
    }

    #[test]
    fn test_sentence_bound() {
        // Runs never cross a sentence boundary
        assert_eq!(chunk("brown foxes run fast. lazy dogs sleep now."), vec![
            "brown foxes run fast",
            "lazy dogs sleep now"
        ]);
    }

    #[test]
    fn test_stop_marks_break_runs() {
        let doc = UnicodeSegmenter::new()
            .apply(Document::new("quick sat lazy", "en"))
            .unwrap();
        let doc = StopWordRemover::from_words(vec!["sat"]).apply(doc).unwrap();
        let doc = PhraseChunker::new().apply(doc).unwrap();

        let phrases: Vec<_> = doc
            .annotations_of(AnnotationKind::Phrase)
            .map(|a| doc.covered_text(a.span().unwrap()))
            .collect();
        assert_eq!(phrases, vec!["quick", "lazy"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(chunk("").is_empty());
    }

    #[test]
    fn test_stage_name() {
        assert_eq!(PhraseChunker::new().name(), "phrase_chunker");
    }
}
