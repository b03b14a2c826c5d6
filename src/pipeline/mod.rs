//! Pipeline runner, document sources, and terminal writers.
//!
//! The runner drives documents from a [`DocumentSource`] through an
//! ordered list of annotator stages and hands the finished documents to an
//! [`AnnotationWriter`].

pub mod pipeline;
pub mod source;
pub mod writer;

// Re-export commonly used types
pub use pipeline::{Pipeline, PipelineRun};
pub use source::{DocumentSource, JsonSource, TextFileSource};
pub use writer::{AnnotationWriter, DumpWriter, PhraseEntityWriter, TopicDistributionWriter};
