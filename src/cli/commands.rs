//! Command implementations for the xyston CLI.

use std::io;
use std::sync::Arc;

use crate::analysis::{
    GazetteerRecognizer, PhraseChunker, StopWordRemover, TopicInferencer, UnicodeSegmenter,
};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{AnnotationKind, Document};
use crate::error::Result;
use crate::pipeline::{
    AnnotationWriter, DumpWriter, JsonSource, PhraseEntityWriter, Pipeline, TextFileSource,
    TopicDistributionWriter,
};

/// Execute a CLI command.
pub fn execute_command(args: XystonArgs) -> Result<()> {
    match &args.command {
        Command::Topics(topics_args) => run_topics(topics_args.clone(), &args),
        Command::Entities(entities_args) => run_entities(entities_args.clone(), &args),
    }
}

/// Run the topic inference pipeline over a batch of text files.
///
/// Mirrors the original example: text reader, segmenter, stop-word
/// remover, topic inferencer, topic-distribution printer.
fn run_topics(args: TopicsArgs, cli_args: &XystonArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Reading documents from: {}", args.source);
        println!("Topic model: {}", args.model.display());
    }

    // Stage resources are bound before any document is processed; a bad
    // model or word list fails here as a configuration error.
    let remover = match &args.stopwords {
        Some(path) => StopWordRemover::from_path(path)?,
        None => StopWordRemover::new(),
    };
    let inferencer = TopicInferencer::from_path(&args.model)?;

    let pipeline = Pipeline::new()
        .with_name("topics")
        .add_stage(Arc::new(UnicodeSegmenter::new()))
        .add_stage(Arc::new(remover))
        .add_stage(Arc::new(inferencer));

    let source = TextFileSource::new(&args.source, &args.language)?;

    let mut results = TopicResults {
        documents: Vec::new(),
    };
    let mut topic_writer = TopicDistributionWriter::new(io::stdout());
    let mut dump_writer = DumpWriter::new(io::stdout());

    for annotated in pipeline.run_all(source) {
        let doc = annotated?;
        if json_selected(cli_args) {
            collect_topics(&doc, &mut results);
        } else if args.dump {
            dump_writer.write_document(&doc)?;
        } else {
            topic_writer.write_document(&doc)?;
        }
    }

    if json_selected(cli_args) {
        output_json(&results, cli_args)?;
    }

    Ok(())
}

/// Run the entity/phrase pipeline over a single JSON document.
///
/// Mirrors the original example: JSON document, segmenter, named-entity
/// recognizer, phrase chunker, entity/phrase printer.
fn run_entities(args: EntitiesArgs, cli_args: &XystonArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Reading document from: {}", args.source.display());
    }

    let recognizer = match &args.gazetteer {
        Some(path) => GazetteerRecognizer::from_path(path)?,
        None => GazetteerRecognizer::new(),
    };

    let pipeline = Pipeline::new()
        .with_name("entities")
        .add_stage(Arc::new(UnicodeSegmenter::new()))
        .add_stage(Arc::new(recognizer))
        .add_stage(Arc::new(PhraseChunker::new()));

    let source = JsonSource::from_path(&args.source)?;

    let mut entity_writer = PhraseEntityWriter::new(io::stdout());
    let mut dump_writer = DumpWriter::new(io::stdout());

    for annotated in pipeline.run_all(source) {
        let doc = annotated?;
        if json_selected(cli_args) {
            let results = collect_entities(&doc, &args);
            output_json(&results, cli_args)?;
        } else if args.dump {
            dump_writer.write_document(&doc)?;
        } else {
            entity_writer.write_document(&doc)?;
        }
    }

    Ok(())
}

/// Project topic distributions into the JSON result structure.
fn collect_topics(doc: &Document, results: &mut TopicResults) {
    for annotation in doc.annotations_of(AnnotationKind::TopicDistribution) {
        results.documents.push(DocumentTopics {
            document: doc.path().unwrap_or("<document>").to_string(),
            weights: annotation.weights().unwrap_or(&[]).to_vec(),
        });
    }
}

/// Project entities and phrases into the JSON result structure.
fn collect_entities(doc: &Document, args: &EntitiesArgs) -> EntityResults {
    let entities = doc
        .annotations_of(AnnotationKind::NamedEntity)
        .filter_map(|a| {
            let span = a.span()?;
            Some(EntityOutput {
                text: doc.covered_text(span).to_string(),
                label: a.label().unwrap_or("?").to_string(),
                start: span.start,
                end: span.end,
            })
        })
        .collect();
    let phrases = doc
        .annotations_of(AnnotationKind::Phrase)
        .filter_map(|a| {
            let span = a.span()?;
            Some(PhraseOutput {
                text: doc.covered_text(span).to_string(),
                start: span.start,
                end: span.end,
            })
        })
        .collect();

    EntityResults {
        document: args.source.display().to_string(),
        entities,
        phrases,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> XystonArgs {
        XystonArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_topics_missing_model_fails_before_processing() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.txt", dir.path().display());

        let args = parse(&["xyston", "-q", "topics", &pattern, "--model", "missing.json"]);
        let err = execute_command(args).unwrap_err();

        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_topics_over_empty_source_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let mut model = std::fs::File::create(&model_path).unwrap();
        write!(
            model,
            r#"{{"num_topics": 2, "topic_words": {{"cat": [0.9, 0.1]}}}}"#
        )
        .unwrap();

        let pattern = format!("{}/*.txt", dir.path().display());
        let args = parse(&[
            "xyston",
            "-q",
            "topics",
            &pattern,
            "--model",
            model_path.to_str().unwrap(),
        ]);

        execute_command(args).unwrap();
    }

    #[test]
    fn test_entities_missing_source_is_configuration_error() {
        let args = parse(&["xyston", "-q", "entities", "no/such/document.json"]);
        let err = execute_command(args).unwrap_err();

        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_entities_end_to_end() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"language": "en", "text": "Barack Obama visited Berlin."}}"#
        )
        .unwrap();

        let args = parse(&["xyston", "-q", "entities", file.path().to_str().unwrap()]);
        execute_command(args).unwrap();
    }
}
