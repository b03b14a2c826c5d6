//! # Xyston
//!
//! A linear text annotation pipeline library for Rust.
//!
//! ## Features
//!
//! - Documents flow through an ordered list of annotator stages
//! - Stages only append annotations; documents stay monotone
//! - Pluggable stages: segmentation, stop-word marking, named-entity
//!   recognition, phrase chunking, topic inference
//! - Batch (glob) and single-document (JSON) sources
//! - Terminal writers for topic distributions, entities, and full dumps

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod pipeline;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
