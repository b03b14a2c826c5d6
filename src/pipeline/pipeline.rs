//! Pipeline runner that drives documents through annotator stages.
//!
//! This is the main building block of the crate. A [`Pipeline`] holds an
//! ordered list of stages; [`Pipeline::run_one`] threads a single document
//! through every stage in declared order, and [`Pipeline::run_all`] drives
//! every document produced by a [`DocumentSource`], one at a time.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use xyston::analysis::{StopWordRemover, UnicodeSegmenter};
//! use xyston::document::{AnnotationKind, Document};
//! use xyston::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new()
//!     .add_stage(Arc::new(UnicodeSegmenter::new()))
//!     .add_stage(Arc::new(StopWordRemover::new()));
//!
//! let doc = pipeline.run_one(Document::new("The cat sat.", "en")).unwrap();
//!
//! assert_eq!(doc.annotations_of(AnnotationKind::Token).count(), 3);
//! assert_eq!(doc.annotations_of(AnnotationKind::StopWord).count(), 1);
//! ```

use std::sync::Arc;

use crate::analysis::annotator::Annotator;
use crate::document::Document;
use crate::error::{Result, XystonError};
use crate::pipeline::source::DocumentSource;

/// An ordered, immutable sequence of annotator stages.
///
/// Stages run strictly sequentially; one document is fully drained through
/// all stages before the next document starts. Construction is fluent:
/// start from [`Pipeline::new`] and append stages with
/// [`Pipeline::add_stage`].
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Annotator>>,
    name: String,
}

impl Pipeline {
    /// Create a new pipeline with no stages.
    pub fn new() -> Self {
        Pipeline {
            stages: Vec::new(),
            name: "pipeline".to_string(),
        }
    }

    /// Append a stage to the pipeline.
    pub fn add_stage(mut self, stage: Arc<dyn Annotator>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Set a custom name for this pipeline (used in logging).
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the stages of this pipeline.
    pub fn stages(&self) -> &[Arc<dyn Annotator>] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run a single document through every stage, in order.
    ///
    /// The document is passed by ownership from stage to stage and
    /// returned fully annotated. If a stage fails, the error names the
    /// stage and its position, and the remaining stages are not run for
    /// this document (fail-fast). An empty pipeline returns the document
    /// unchanged.
    pub fn run_one(&self, mut doc: Document) -> Result<Document> {
        for (index, stage) in self.stages.iter().enumerate() {
            tracing::debug!(pipeline = %self.name, stage = stage.name(), index, "applying stage");
            doc = stage
                .apply(doc)
                .map_err(|e| XystonError::stage(stage.name(), index, e.to_string()))?;
        }
        Ok(doc)
    }

    /// Run every document produced by `source` through the pipeline.
    ///
    /// Returns a lazy iterator over `Result<Document>`: documents are
    /// pulled from the source one at a time and each is fully annotated
    /// before the next is read. A source yielding zero documents produces
    /// an empty sequence. The iterator is restartable only by building a
    /// new source.
    pub fn run_all<S: DocumentSource>(&self, source: S) -> PipelineRun<'_, S> {
        tracing::info!(pipeline = %self.name, stages = self.stages.len(), "starting run");
        PipelineRun {
            pipeline: self,
            source,
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Lazy iterator returned by [`Pipeline::run_all`].
pub struct PipelineRun<'a, S> {
    pipeline: &'a Pipeline,
    source: S,
}

impl<'a, S: DocumentSource> Iterator for PipelineRun<'a, S> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.source.next_document() {
            Ok(Some(doc)) => Some(self.pipeline.run_one(doc)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::segmenter::UnicodeSegmenter;
    use crate::document::{Annotation, AnnotationKind, Span};

    /// A stage that always fails, for exercising fail-fast behavior.
    struct FailingStage;

    impl Annotator for FailingStage {
        fn apply(&self, _doc: Document) -> Result<Document> {
            Err(XystonError::other("deliberate failure"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// A stage that appends one marker annotation.
    struct MarkerStage;

    impl Annotator for MarkerStage {
        fn apply(&self, mut doc: Document) -> Result<Document> {
            doc.push_annotation(Annotation::phrase(Span::new(0, 1)));
            Ok(doc)
        }

        fn name(&self) -> &'static str {
            "marker"
        }
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        let doc = Document::new("The cat sat.", "en");
        let result = pipeline.run_one(doc.clone()).unwrap();

        assert_eq!(result, doc);
    }

    #[test]
    fn test_stages_run_in_order() {
        let pipeline = Pipeline::new()
            .add_stage(Arc::new(UnicodeSegmenter::new()))
            .add_stage(Arc::new(MarkerStage));

        let doc = pipeline.run_one(Document::new("Hi there.", "en")).unwrap();

        // Marker annotation is appended after the segmenter's annotations
        assert_eq!(doc.annotations().last().unwrap().kind(), AnnotationKind::Phrase);
    }

    #[test]
    fn test_failing_stage_reports_name_and_index() {
        let pipeline = Pipeline::new()
            .add_stage(Arc::new(UnicodeSegmenter::new()))
            .add_stage(Arc::new(FailingStage));

        let err = pipeline
            .run_one(Document::new("Hi there.", "en"))
            .unwrap_err();

        match err {
            XystonError::Stage { stage, index, .. } => {
                assert_eq!(stage, "failing");
                assert_eq!(index, 1);
            }
            other => panic!("Expected Stage error, got {other}"),
        }
    }

    #[test]
    fn test_run_all_over_in_memory_source() {
        let pipeline = Pipeline::new().add_stage(Arc::new(UnicodeSegmenter::new()));
        let docs = vec![
            Document::new("One sentence.", "en"),
            Document::new("Another one.", "en"),
        ];

        let results: Vec<_> = pipeline.run_all(docs.into_iter()).collect();

        assert_eq!(results.len(), 2);
        for result in results {
            let doc = result.unwrap();
            assert_eq!(doc.annotations_of(AnnotationKind::Sentence).count(), 1);
        }
    }

    #[test]
    fn test_run_all_empty_source() {
        let pipeline = Pipeline::new().add_stage(Arc::new(UnicodeSegmenter::new()));
        let results: Vec<_> = pipeline.run_all(Vec::new().into_iter()).collect();
        assert!(results.is_empty());
    }

    #[test]
    fn test_pipeline_debug_lists_stage_names() {
        let pipeline = Pipeline::new()
            .add_stage(Arc::new(UnicodeSegmenter::new()))
            .with_name("demo");
        let debug = format!("{pipeline:?}");

        assert!(debug.contains("demo"));
        assert!(debug.contains("segmenter"));
    }
}
