//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsString;

use clap::{ArgAction, Parser};

/// Long description shown by `--help`.
pub const LONG_ABOUT: &str = "\
Copies the ChromaDB MCP server data from the old src/chroma/data directory
to the new src/chroma_mcp/data directory.

Existing directories in the destination are merged and existing files are
overwritten. The old directory is left in place; remove it yourself once
the copy is verified.";

/// Flags that are passed on to clap. Everything else is dropped.
const RECOGNIZED_FLAGS: &[&str] = &["-h", "--help", "-v", "--verbose", "--no-progress"];

/// CLI arguments for chroma-migrate.
#[derive(Debug, Default, Parser)]
#[command(
    name = "chroma-migrate",
    about = "Migrate ChromaDB MCP server data to the new directory layout",
    long_about = LONG_ABOUT,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Args {
    /// Print help and exit.
    #[arg(long, short = 'h', action = ArgAction::SetTrue)]
    pub help: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl Args {
    /// Parse arguments, ignoring anything that isn't a recognised flag.
    ///
    /// The first item is the program name, as with `std::env::args_os`.
    #[must_use]
    pub fn parse_lenient<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(recognized_args(argv))
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

/// Keep the program name plus each recognised flag once.
fn recognized_args<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let program = argv
        .next()
        .unwrap_or_else(|| OsString::from("chroma-migrate"));

    let mut kept = vec![program];
    for arg in argv {
        let recognized = arg
            .to_str()
            .is_some_and(|flag| RECOGNIZED_FLAGS.contains(&flag));
        if recognized && !kept[1..].contains(&arg) {
            kept.push(arg);
        } else if !recognized {
            log::trace!("Ignoring argument: {}", arg.to_string_lossy());
        }
    }
    kept
}
