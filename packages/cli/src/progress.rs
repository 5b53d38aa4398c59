//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use indicatif::{ProgressBar, ProgressStyle};

/// Directories with at most this many files are copied without a bar.
const MIN_FILES_FOR_BAR: u64 = 2;

/// Progress bar factory for directory copies.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a progress bar for a directory copy operation.
    ///
    /// Returns a hidden bar if progress is disabled or the directory is too
    /// small to be worth one.
    #[must_use]
    pub fn create_file_bar(&self, label: &str, total: u64) -> ProgressBar {
        if !self.enabled || total < MIN_FILES_FOR_BAR {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template("  {prefix:<30} [{bar:25.green/dim}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━━─");

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb.set_prefix(label.to_string());
        pb
    }
}
