//! Topic-distribution inference stage.
//!
//! The inferencer wraps a pre-trained topic model: a topic count, a
//! smoothing prior, and a per-word table of topic weights, loaded from a
//! JSON file at construction time. Applying the stage appends exactly one
//! [`TopicDistribution`](crate::document::AnnotationKind::TopicDistribution)
//! annotation whose vector length equals the model's topic count.
//!
//! Inference is a single additive pass: the prior plus the topic weights
//! of every non-stop token, normalized to sum to one. Training a model and
//! full sampling-based inference belong to the external toolkit that
//! produced the model file.
//!
//! # Examples
//!
//! ```
//! use xyston::analysis::{Annotator, TopicInferencer, TopicModel, UnicodeSegmenter};
//! use xyston::document::{AnnotationKind, Document};
//!
//! let model = TopicModel::from_parts(
//!     2,
//!     vec![0.1, 0.1],
//!     [("cat".to_string(), vec![0.9, 0.1])].into_iter().collect(),
//! )
//! .unwrap();
//!
//! let doc = UnicodeSegmenter::new()
//!     .apply(Document::new("The cat sat.", "en"))
//!     .unwrap();
//! let doc = TopicInferencer::new(model).apply(doc).unwrap();
//!
//! let weights = doc
//!     .annotations_of(AnnotationKind::TopicDistribution)
//!     .next()
//!     .and_then(|a| a.weights())
//!     .unwrap();
//! assert_eq!(weights.len(), 2);
//! assert!(weights[0] > weights[1]);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::annotator::Annotator;
use crate::document::{Annotation, AnnotationKind, Document, Span};
use crate::error::{Result, XystonError};

/// Per-topic smoothing used when a model file carries no prior.
const DEFAULT_ALPHA: f64 = 0.1;

/// A pre-trained topic model.
///
/// The serialized form is a JSON object:
///
/// ```json
/// {
///   "num_topics": 2,
///   "alpha": [0.1, 0.1],
///   "topic_words": { "cat": [0.9, 0.1], "dog": [0.2, 0.8] }
/// }
/// ```
///
/// `alpha` may be omitted, in which case a uniform smoothing prior is
/// used. Every weight vector must have `num_topics` entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopicModel {
    /// Number of topics the model was trained with
    num_topics: usize,

    /// Smoothing prior added to every document's weight vector
    #[serde(default)]
    alpha: Vec<f64>,

    /// Per-word topic weights, keyed by lowercase surface form
    topic_words: HashMap<String, Vec<f64>>,
}

impl TopicModel {
    /// Build a model from its parts, validating the shape.
    pub fn from_parts(
        num_topics: usize,
        alpha: Vec<f64>,
        topic_words: HashMap<String, Vec<f64>>,
    ) -> Result<Self> {
        let model = TopicModel {
            num_topics,
            alpha,
            topic_words,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load a model from a JSON file.
    ///
    /// A missing or malformed file is a configuration error, reported
    /// before any document is processed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            XystonError::configuration(format!(
                "cannot read topic model {}: {e}",
                path.display()
            ))
        })?;

        let model: TopicModel = serde_json::from_str(&contents).map_err(|e| {
            XystonError::configuration(format!(
                "malformed topic model {}: {e}",
                path.display()
            ))
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Number of topics.
    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// Number of words in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.topic_words.len()
    }

    /// Topic weights for a word, if it is in the vocabulary.
    pub fn word_weights(&self, word: &str) -> Option<&[f64]> {
        self.topic_words.get(word).map(|w| w.as_slice())
    }

    fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(XystonError::configuration(
                "topic model must have at least one topic",
            ));
        }
        if !self.alpha.is_empty() && self.alpha.len() != self.num_topics {
            return Err(XystonError::configuration(format!(
                "alpha has {} entries, expected {}",
                self.alpha.len(),
                self.num_topics
            )));
        }
        if self.alpha.iter().any(|&a| !a.is_finite() || a < 0.0) {
            return Err(XystonError::configuration(
                "alpha entries must be finite and non-negative",
            ));
        }
        for (word, weights) in &self.topic_words {
            if weights.len() != self.num_topics {
                return Err(XystonError::configuration(format!(
                    "word '{word}' has {} weights, expected {}",
                    weights.len(),
                    self.num_topics
                )));
            }
            if weights.iter().any(|&w| !w.is_finite() || w < 0.0) {
                return Err(XystonError::configuration(format!(
                    "word '{word}' has a negative or non-finite weight"
                )));
            }
        }
        Ok(())
    }

    /// The smoothing prior, expanded to one entry per topic.
    fn prior(&self) -> Vec<f64> {
        if self.alpha.is_empty() {
            vec![DEFAULT_ALPHA; self.num_topics]
        } else {
            self.alpha.clone()
        }
    }
}

/// A stage that infers a per-document topic distribution from a
/// pre-trained [`TopicModel`].
///
/// Tokens covered by a stop-word mark are skipped; remaining token texts
/// are lowercased before vocabulary lookup. Words outside the vocabulary
/// leave the prior untouched, so even an empty document yields a
/// normalized vector of the model's topic count.
#[derive(Clone, Debug)]
pub struct TopicInferencer {
    model: TopicModel,
}

impl TopicInferencer {
    /// Create an inferencer over a loaded model.
    pub fn new(model: TopicModel) -> Self {
        TopicInferencer { model }
    }

    /// Create an inferencer from a model file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(TopicModel::from_path(path)?))
    }

    /// The wrapped model.
    pub fn model(&self) -> &TopicModel {
        &self.model
    }
}

impl Annotator for TopicInferencer {
    fn apply(&self, mut doc: Document) -> Result<Document> {
        let stop_marks: Vec<Span> = doc
            .annotations_of(AnnotationKind::StopWord)
            .filter_map(|a| a.span())
            .copied()
            .collect();

        let mut weights = self.model.prior();
        let mut matched = 0usize;

        for token in doc.annotations_of(AnnotationKind::Token) {
            let span = match token.span() {
                Some(span) => span,
                None => continue,
            };
            if stop_marks.contains(span) {
                continue;
            }
            let word = doc.covered_text(span).to_lowercase();
            if let Some(word_weights) = self.model.word_weights(&word) {
                matched += 1;
                for (weight, word_weight) in weights.iter_mut().zip(word_weights) {
                    *weight += word_weight;
                }
            }
        }

        let sum: f64 = weights.iter().sum();
        if sum > 0.0 {
            for weight in &mut weights {
                *weight /= sum;
            }
        } else {
            weights = vec![1.0 / self.model.num_topics() as f64; self.model.num_topics()];
        }

        tracing::debug!(
            matched,
            topics = self.model.num_topics(),
            "inferred topic distribution"
        );

        doc.push_annotation(Annotation::topic_distribution(weights));
        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "topic_inferencer"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::analysis::segmenter::UnicodeSegmenter;
    use crate::analysis::stop_words::StopWordRemover;

    fn sample_model() -> TopicModel {
        TopicModel::from_parts(
            3,
            vec![0.1, 0.1, 0.1],
            [
                ("cat".to_string(), vec![0.8, 0.1, 0.1]),
                ("dog".to_string(), vec![0.7, 0.2, 0.1]),
                ("market".to_string(), vec![0.1, 0.8, 0.1]),
            ]
            .into_iter()
            .collect(),
        )
        .unwrap()
    }

    fn infer(text: &str, model: TopicModel) -> Vec<f64> {
        let doc = UnicodeSegmenter::new()
            .apply(Document::new(text, "en"))
            .unwrap();
        let doc = StopWordRemover::new().apply(doc).unwrap();
        let doc = TopicInferencer::new(model).apply(doc).unwrap();
        doc.annotations_of(AnnotationKind::TopicDistribution)
            .next()
            .and_then(|a| a.weights())
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_vector_length_matches_topic_count() {
        let weights = infer("The cat sat.", sample_model());
        assert_eq!(weights.len(), 3);
    }

    #[test]
    fn test_distribution_is_normalized() {
        let weights = infer("The cat chased the dog.", sample_model());
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vocabulary_words_shift_weights() {
        let weights = infer("The cat sat.", sample_model());
        // "cat" loads topic 0
        assert!(weights[0] > weights[1]);
        assert!(weights[0] > weights[2]);
    }

    #[test]
    fn test_unknown_words_leave_prior() {
        let weights = infer("zyzzyva qwerty.", sample_model());
        for pair in weights.windows(2) {
            assert!((pair[0] - pair[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_document_yields_normalized_prior() {
        let weights = infer("", sample_model());
        assert_eq!(weights.len(), 3);
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_path_and_default_alpha() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"num_topics": 2, "topic_words": {{"cat": [0.9, 0.1]}}}}"#
        )
        .unwrap();

        let model = TopicModel::from_path(file.path()).unwrap();
        assert_eq!(model.num_topics(), 2);
        assert_eq!(model.vocabulary_size(), 1);
    }

    #[test]
    fn test_missing_model_is_configuration_error() {
        let err = TopicModel::from_path("no/such/model.json").unwrap_err();
        assert!(matches!(err, XystonError::Configuration(_)));
    }

    #[test]
    fn test_shape_mismatch_is_configuration_error() {
        let err = TopicModel::from_parts(
            2,
            vec![0.1, 0.1],
            [("cat".to_string(), vec![1.0])].into_iter().collect(),
        )
        .unwrap_err();
        assert!(matches!(err, XystonError::Configuration(_)));
    }

    #[test]
    fn test_zero_topics_rejected() {
        let err = TopicModel::from_parts(0, vec![], HashMap::new()).unwrap_err();
        assert!(matches!(err, XystonError::Configuration(_)));
    }

    #[test]
    fn test_stop_words_are_skipped() {
        // "the" would otherwise be looked up; give it weight to prove skipping
        let model = TopicModel::from_parts(
            2,
            vec![0.0, 0.0],
            [("the".to_string(), vec![1.0, 0.0])].into_iter().collect(),
        )
        .unwrap();
        let weights = infer("The market.", model);
        // "the" skipped, "market" unknown to this model, prior is zero → uniform fallback
        assert_eq!(weights, vec![0.5, 0.5]);
    }

    #[test]
    fn test_stage_name() {
        assert_eq!(TopicInferencer::new(sample_model()).name(), "topic_inferencer");
    }
}
