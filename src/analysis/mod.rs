//! Annotator stages for the xyston pipeline.
//!
//! This module provides the [`Annotator`] stage contract and the stage
//! implementations the two example pipelines are built from: sentence and
//! token segmentation, stop-word marking, gazetteer-based named-entity
//! recognition, shallow phrase chunking, and topic-distribution inference.

pub mod annotator;
pub mod chunker;
pub mod gazetteer;
pub mod segmenter;
pub mod stop_words;
pub mod topic;

// Re-export commonly used types
pub use annotator::Annotator;
pub use chunker::PhraseChunker;
pub use gazetteer::GazetteerRecognizer;
pub use segmenter::UnicodeSegmenter;
pub use stop_words::StopWordRemover;
pub use topic::{TopicInferencer, TopicModel};
