//! Events reported while a migration runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::path::PathBuf;

use chroma_migrate_copy::CopyProgress;

/// Kind of a source entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file (or a symlink to one).
    File,
    /// A directory (or a symlink to one), copied recursively.
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// Something that happened during a migration run.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationEvent {
    /// The source directory does not exist.
    SourceMissing {
        /// The source path.
        source: PathBuf,
    },
    /// The source directory has no entries.
    SourceEmpty {
        /// The source path.
        source: PathBuf,
    },
    /// The source entries were listed.
    Found {
        /// Number of immediate entries.
        entries: usize,
    },
    /// Files were copied inside a directory entry.
    ///
    /// The first report for a directory has `files_copied == 0` and carries
    /// the total.
    DirectoryProgress {
        /// Entry name.
        name: String,
        /// Progress within the directory.
        progress: CopyProgress,
    },
    /// An entry was copied.
    Copied {
        /// Entry name.
        name: String,
        /// Whether it was a file or a directory.
        kind: EntryKind,
    },
    /// Every entry was copied.
    Completed {
        /// The source path.
        source: PathBuf,
        /// The destination path.
        destination: PathBuf,
        /// Number of entries copied.
        entries: usize,
    },
}
