//! Document and annotation model for the pipeline.
//!
//! A [`Document`] is raw text plus a language tag and a growable collection
//! of [`Annotation`] values appended by the pipeline stages.

pub mod annotation;
pub mod document;

// Re-export commonly used types
pub use annotation::{Annotation, AnnotationKind, Span};
pub use document::{Document, DocumentBuilder};
