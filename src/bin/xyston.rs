//! xyston CLI binary.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;
use xyston::cli::{args::*, commands::*};

fn main() {
    // Parse command line arguments using clap
    let args = XystonArgs::parse();

    // Map verbosity to a default log filter; RUST_LOG still wins
    let default_filter = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
