//! Error types for the migration.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

use crate::MigrationState;

/// Errors that abort a migration run.
///
/// Every variant is fatal for the run. Entries copied before the failure
/// stay in the destination.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Failed to create the destination directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDestination {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to list the source directory.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadSource {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to inspect a source entry.
    #[error("Failed to inspect {}: {source}", path.display())]
    InspectEntry {
        /// The entry path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Copying an entry failed.
    #[error(transparent)]
    Copy(#[from] chroma_migrate_copy::CopyError),

    /// The migrator was asked to run a second time.
    #[error("Migration already ran (state: {state})")]
    AlreadyRun {
        /// State the migrator was left in.
        state: MigrationState,
    },
}
