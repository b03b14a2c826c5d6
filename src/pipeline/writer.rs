//! Terminal consumers that print annotations of finished documents.
//!
//! Writers sit after the last stage: they read the requested annotation
//! kinds off a fully annotated document and write a textual rendering to
//! an [`io::Write`] sink. Writing is a pure side effect; nothing feeds
//! back into the pipeline. A document without the requested kinds simply
//! produces no output lines.

use std::io;

use crate::document::{AnnotationKind, Document};
use crate::error::Result;

/// Trait for terminal consumers of annotated documents.
pub trait AnnotationWriter {
    /// Render the relevant annotations of one finished document.
    fn write_document(&mut self, doc: &Document) -> Result<()>;
}

/// Label used when a document has no source path.
fn document_label(doc: &Document) -> &str {
    doc.path().unwrap_or("<document>")
}

/// Writes one line per topic-distribution annotation.
///
/// # Examples
///
/// ```
/// use xyston::document::{Annotation, Document};
/// use xyston::pipeline::{AnnotationWriter, TopicDistributionWriter};
///
/// let mut doc = Document::new("The cat sat.", "en");
/// doc.push_annotation(Annotation::topic_distribution(vec![0.75, 0.25]));
///
/// let mut writer = TopicDistributionWriter::new(Vec::new());
/// writer.write_document(&doc).unwrap();
///
/// let output = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(output, "<document>: [0.7500, 0.2500]\n");
/// ```
#[derive(Debug)]
pub struct TopicDistributionWriter<W: io::Write> {
    out: W,
}

impl<W: io::Write> TopicDistributionWriter<W> {
    /// Create a writer over a sink.
    pub fn new(out: W) -> Self {
        TopicDistributionWriter { out }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> AnnotationWriter for TopicDistributionWriter<W> {
    fn write_document(&mut self, doc: &Document) -> Result<()> {
        for annotation in doc.annotations_of(AnnotationKind::TopicDistribution) {
            let weights = annotation
                .weights()
                .unwrap_or(&[])
                .iter()
                .map(|w| format!("{w:.4}"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.out, "{}: [{}]", document_label(doc), weights)?;
        }
        Ok(())
    }
}

/// Writes recognized named entities and shallow phrases, one per line.
///
/// Output format per line: kind, label (entities only), covered text,
/// span. Documents without entity or phrase annotations produce no lines.
#[derive(Debug)]
pub struct PhraseEntityWriter<W: io::Write> {
    out: W,
}

impl<W: io::Write> PhraseEntityWriter<W> {
    /// Create a writer over a sink.
    pub fn new(out: W) -> Self {
        PhraseEntityWriter { out }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> AnnotationWriter for PhraseEntityWriter<W> {
    fn write_document(&mut self, doc: &Document) -> Result<()> {
        for annotation in doc.annotations_of(AnnotationKind::NamedEntity) {
            if let Some(span) = annotation.span() {
                writeln!(
                    self.out,
                    "entity\t{}\t\"{}\"\t{}",
                    annotation.label().unwrap_or("?"),
                    doc.covered_text(span),
                    span
                )?;
            }
        }
        for annotation in doc.annotations_of(AnnotationKind::Phrase) {
            if let Some(span) = annotation.span() {
                writeln!(self.out, "phrase\t\"{}\"\t{}", doc.covered_text(span), span)?;
            }
        }
        Ok(())
    }
}

/// Writes every annotation of a document, one per line, with its kind,
/// span, and covered text. Useful for inspecting what a pipeline did.
#[derive(Debug)]
pub struct DumpWriter<W: io::Write> {
    out: W,
}

impl<W: io::Write> DumpWriter<W> {
    /// Create a writer over a sink.
    pub fn new(out: W) -> Self {
        DumpWriter { out }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> AnnotationWriter for DumpWriter<W> {
    fn write_document(&mut self, doc: &Document) -> Result<()> {
        writeln!(
            self.out,
            "{} ({} annotations)",
            document_label(doc),
            doc.annotations().len()
        )?;
        for annotation in doc.annotations() {
            match annotation.span() {
                Some(span) => writeln!(
                    self.out,
                    "  {}\t{}\t\"{}\"",
                    annotation.kind(),
                    span,
                    doc.covered_text(span)
                )?,
                None => writeln!(self.out, "  {}\t{:?}", annotation.kind(), annotation)?,
            }
        }
        Ok(())
    }
}
