//! Error types for the xyston library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`XystonError`] enum. Configuration problems (missing model files, bad
//! glob patterns, malformed single-document JSON) are surfaced before any
//! document is processed; stage failures carry the name and position of the
//! failing stage.
//!
//! # Examples
//!
//! ```
//! use xyston::error::{Result, XystonError};
//!
//! fn load_model(path: &str) -> Result<()> {
//!     Err(XystonError::configuration(format!("model file not found: {path}")))
//! }
//!
//! match load_model("missing.json") {
//!     Ok(_) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for xyston operations.
#[derive(Error, Debug)]
pub enum XystonError {
    /// I/O errors (reading source files, word lists, models)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bad or missing configuration (model path, word list, glob pattern,
    /// malformed document JSON); raised before any document is processed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A stage failed while processing a document; aborts the remaining
    /// stages for that document only
    #[error("Stage '{stage}' (#{index}) failed: {message}")]
    Stage {
        /// Name of the failing stage
        stage: String,
        /// Position of the stage in the configured sequence (0-based)
        index: usize,
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with XystonError.
pub type Result<T> = std::result::Result<T, XystonError>;

impl XystonError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        XystonError::Configuration(msg.into())
    }

    /// Create a new stage execution error.
    pub fn stage<S: Into<String>, M: Into<String>>(stage: S, index: usize, message: M) -> Self {
        XystonError::Stage {
            stage: stage.into(),
            index,
            message: message.into(),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        XystonError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        XystonError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
