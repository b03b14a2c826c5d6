//! Command line argument parsing for the xyston CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// xyston - a linear text annotation pipeline
#[derive(Parser, Debug, Clone)]
#[command(name = "xyston")]
#[command(about = "A linear text annotation pipeline for Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Xyston Contributors")]
#[command(long_about = None)]
pub struct XystonArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl XystonArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Infer topic distributions for a batch of text files
    Topics(TopicsArgs),

    /// Recognize named entities and phrases in a single JSON document
    Entities(EntitiesArgs),
}

/// Arguments for the topic inference pipeline
#[derive(Parser, Debug, Clone)]
pub struct TopicsArgs {
    /// Glob pattern for the input text files
    #[arg(value_name = "SOURCE", default_value = "texts/*")]
    pub source: String,

    /// Pre-trained topic model file (JSON)
    #[arg(short, long, value_name = "MODEL_FILE", default_value = "models/topics.json")]
    pub model: PathBuf,

    /// Stop-word list file, one word per line (default: built-in English list)
    #[arg(long, value_name = "STOPWORD_FILE")]
    pub stopwords: Option<PathBuf>,

    /// Language tag attached to every document
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Dump every annotation instead of only topic distributions
    #[arg(long)]
    pub dump: bool,
}

/// Arguments for the entity/phrase pipeline
#[derive(Parser, Debug, Clone)]
pub struct EntitiesArgs {
    /// Path to a JSON document file with `language` and `text` fields
    #[arg(value_name = "SOURCE", default_value = "document.json")]
    pub source: PathBuf,

    /// Gazetteer model file (JSON, label to phrase list; default: built-in demo table)
    #[arg(short, long, value_name = "GAZETTEER_FILE")]
    pub gazetteer: Option<PathBuf>,

    /// Dump every annotation instead of only entities and phrases
    #[arg(long)]
    pub dump: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
