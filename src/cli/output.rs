//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, XystonArgs};
use crate::error::Result;

/// Topic distribution of one document.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentTopics {
    pub document: String,
    pub weights: Vec<f64>,
}

/// Result structure for the topics command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TopicResults {
    pub documents: Vec<DocumentTopics>,
}

/// One recognized entity.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntityOutput {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

/// One shallow phrase.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhraseOutput {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Result structure for the entities command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntityResults {
    pub document: String,
    pub entities: Vec<EntityOutput>,
    pub phrases: Vec<PhraseOutput>,
}

/// Serialize a result as JSON, honoring `--pretty`.
pub fn output_json<T: Serialize>(result: &T, args: &XystonArgs) -> Result<()> {
    let rendered = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{rendered}");
    Ok(())
}

/// Check if the selected format is JSON.
pub fn json_selected(args: &XystonArgs) -> bool {
    matches!(args.output_format, OutputFormat::Json)
}
