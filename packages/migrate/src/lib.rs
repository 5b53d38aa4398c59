//! Data migration for the ChromaDB MCP server.
//!
//! Copies everything under the legacy `src/chroma/data` directory into the
//! current `src/chroma_mcp/data` directory. The source is left in place;
//! removing it is up to the operator.
//!
//! * [`migrate`] works on any pair of directories
//! * [`Migrator`] wraps one run and tracks its [`MigrationState`]
//! * [`MigrationPaths::from_root`] supplies the fixed project layout
//!
//! # Example
//!
//! ```rust,ignore
//! use chroma_migrate::{MigrationEvent, MigrationPaths, Migrator};
//!
//! let mut migrator = Migrator::new(MigrationPaths::from_root(Path::new(".")));
//! let result = migrator.run(|event: &MigrationEvent| println!("{event:?}"))?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod event;
mod migrator;
mod paths;

pub use error::MigrateError;
pub use event::{EntryKind, MigrationEvent};
pub use migrator::{MigrationResult, MigrationState, Migrator, NoOpReason, migrate};
pub use paths::{CURRENT_DATA_DIR, LEGACY_DATA_DIR, MigrationPaths};

pub use chroma_migrate_copy::{CopyError, CopyProgress};
