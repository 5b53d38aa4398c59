//! Renders migration events to the terminal.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use chroma_migrate::MigrationEvent;
use indicatif::ProgressBar;

use crate::output;
use crate::progress::ProgressManager;

/// Turns [`MigrationEvent`]s into console output.
///
/// A directory's bar is created from its first progress report, which
/// carries the file total, and cleared before the `Copied directory:` line.
pub struct Reporter {
    progress: ProgressManager,
    bar: Option<ProgressBar>,
}

impl Reporter {
    /// Create a reporter.
    #[must_use]
    pub const fn new(progress: ProgressManager) -> Self {
        Self {
            progress,
            bar: None,
        }
    }

    /// Handle one event.
    pub fn handle(&mut self, event: &MigrationEvent) {
        match event {
            MigrationEvent::SourceMissing { source } => output::print_source_missing(source),
            MigrationEvent::SourceEmpty { source } => output::print_source_empty(source),
            MigrationEvent::Found { entries } => output::print_found(*entries),
            MigrationEvent::DirectoryProgress { name, progress } => {
                let manager = &self.progress;
                let bar = self
                    .bar
                    .get_or_insert_with(|| manager.create_file_bar(name, progress.files_total));
                bar.set_position(progress.files_copied);
            }
            MigrationEvent::Copied { name, kind } => {
                self.clear_bar();
                output::print_copied(name, *kind);
            }
            MigrationEvent::Completed {
                source,
                destination,
                ..
            } => output::print_completed(source, destination),
        }
    }

    /// Clear any bar left over from an aborted directory copy.
    pub fn finish(&mut self) {
        self.clear_bar();
    }

    fn clear_bar(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
