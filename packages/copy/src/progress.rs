//! Progress reporting for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Progress information for a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyProgress {
    /// Total number of files to copy.
    pub files_total: u64,
    /// Number of files copied so far.
    pub files_copied: u64,
    /// Current file being copied (if any).
    pub current_file: Option<String>,
}

impl CopyProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(files_total: u64, files_copied: u64, current_file: Option<String>) -> Self {
        Self {
            files_total,
            files_copied,
            current_file,
        }
    }
}
