//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use chroma_migrate::EntryKind;
use clap::CommandFactory;
use colored::Colorize;

use crate::args::Args;

/// Tool name shown in the banner.
pub const TOOL_NAME: &str = "ChromaDB MCP Server - Data Migration Utility";

/// Print the banner.
pub fn print_header() {
    println!("{}\n", TOOL_NAME.bold());
}

/// Print the long help text.
pub fn print_help() {
    print!("{}", Args::command().render_long_help());
}

/// Print the messages for a missing source directory.
pub fn print_source_missing(source: &Path) {
    println!("No data directory found at {}", source.display());
    println!("No migration needed.");
}

/// Print the message for an empty source directory.
pub fn print_source_empty(source: &Path) {
    println!("No data found in {}", source.display());
}

/// Print the number of entries about to be copied.
pub fn print_found(entries: usize) {
    println!("Found {entries} items to migrate");
}

/// Print a copied entry.
pub fn print_copied(name: &str, kind: EntryKind) {
    println!("{}", format_copied(name, kind));
}

/// Print the completion summary and cleanup hint.
pub fn print_completed(source: &Path, destination: &Path) {
    println!("\n{}", "Migration completed successfully!".green().bold());
    println!(
        "Data migrated from {} to {}",
        source.display().to_string().cyan(),
        destination.display().to_string().cyan()
    );
    println!("\nYou can now remove the old directory if you wish with:");
    println!("{}", format_cleanup_command(source));
}

/// Print error message.
pub fn print_error(message: &str) {
    println!("{} {}", "Error during migration:".red().bold(), message);
}

/// Format the line for a copied entry.
#[must_use]
pub fn format_copied(name: &str, kind: EntryKind) -> String {
    format!("Copied {kind}: {}", name.yellow())
}

/// Format the suggested removal command for the source directory.
///
/// The path is single-quoted when the shell would otherwise split or expand it.
#[must_use]
pub fn format_cleanup_command(source: &Path) -> String {
    let path = source.to_string_lossy();
    let needs_quoting = path
        .chars()
        .any(|c| c.is_whitespace() || "'\"$`\\*?[]{}()<>|&;#~!".contains(c));

    if needs_quoting {
        format!("rm -rf '{}'", path.replace('\'', r"'\''"))
    } else {
        format!("rm -rf {path}")
    }
}
