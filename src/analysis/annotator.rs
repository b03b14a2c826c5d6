//! The annotator stage contract.

use crate::document::Document;
use crate::error::Result;

/// Trait for pipeline stages that annotate documents.
///
/// A stage receives the document by value and returns it with zero or more
/// annotations appended. Stages never remove or reorder existing
/// annotations, and no stage may depend on execution order beyond "runs
/// after stages placed earlier in the configured sequence".
///
/// Implementations wrap external NLP capabilities (word segmentation
/// rules, a stop-word list, a gazetteer, a pre-trained topic model); any
/// equivalent library can be substituted behind this trait without
/// touching the pipeline runner.
pub trait Annotator: Send + Sync {
    /// Apply this stage to a document.
    fn apply(&self, doc: Document) -> Result<Document>;

    /// Get the name of this stage (for error reporting and logging).
    fn name(&self) -> &'static str;
}
