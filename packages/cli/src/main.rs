//! chroma-migrate CLI entry point.
//!
//! Copies ChromaDB MCP server data from `src/chroma/data` to
//! `src/chroma_mcp/data`, relative to the working directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;
mod report;

use std::env;
use std::path::Path;

use args::Args;
use chroma_migrate::{MigrationPaths, Migrator};
use progress::ProgressManager;
use report::Reporter;

fn main() {
    let args = Args::parse_lenient(env::args_os());

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    output::print_header();

    if args.help {
        output::print_help();
        return;
    }

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let paths = MigrationPaths::from_root(Path::new("."));
    log::debug!(
        "Source: {}, destination: {}",
        paths.source.display(),
        paths.destination.display()
    );

    let mut migrator = Migrator::new(paths);
    let mut reporter = Reporter::new(ProgressManager::new(args.should_show_progress()));

    let result = migrator.run(|event| reporter.handle(event));
    reporter.finish();

    let result = result?;
    log::debug!("Migration result: {result:?}");

    Ok(())
}
