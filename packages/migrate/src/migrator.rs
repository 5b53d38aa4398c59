//! The migration procedure.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::fs;
use std::path::Path;

use chroma_migrate_copy::{merge_directory, overwrite_file};

use crate::error::MigrateError;
use crate::event::{EntryKind, MigrationEvent};
use crate::paths::MigrationPaths;

/// Why a run copied nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The source directory does not exist.
    SourceMissing,
    /// The source directory exists but has no entries.
    SourceEmpty,
}

/// Outcome of a successful migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationResult {
    /// At least one entry was copied.
    Migrated {
        /// Number of immediate entries copied.
        entries: usize,
    },
    /// There was nothing to migrate.
    NoOp(NoOpReason),
}

impl MigrationResult {
    /// Whether anything was copied.
    #[must_use]
    pub const fn is_migrated(&self) -> bool {
        matches!(self, Self::Migrated { .. })
    }
}

/// Lifecycle of a [`Migrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    /// `run` has not been called.
    NotStarted,
    /// Entries are being copied.
    Running,
    /// Every entry was copied.
    Completed,
    /// There was nothing to migrate.
    NoOp,
    /// The run aborted with an error.
    Failed,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::NoOp => "no-op",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One-shot migrator for a pair of directories.
#[derive(Debug)]
pub struct Migrator {
    paths: MigrationPaths,
    state: MigrationState,
}

impl Migrator {
    /// Create a migrator that has not run yet.
    #[must_use]
    pub const fn new(paths: MigrationPaths) -> Self {
        Self {
            paths,
            state: MigrationState::NotStarted,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> MigrationState {
        self.state
    }

    /// Run the migration once.
    ///
    /// # Errors
    ///
    /// * If the migrator already ran
    /// * If any filesystem operation fails (see [`migrate`])
    pub fn run<F>(&mut self, on_event: F) -> Result<MigrationResult, MigrateError>
    where
        F: FnMut(&MigrationEvent),
    {
        if self.state != MigrationState::NotStarted {
            return Err(MigrateError::AlreadyRun { state: self.state });
        }

        self.state = MigrationState::Running;
        let result = migrate(&self.paths.source, &self.paths.destination, on_event);

        self.state = match &result {
            Ok(MigrationResult::Migrated { .. }) => MigrationState::Completed,
            Ok(MigrationResult::NoOp(_)) => MigrationState::NoOp,
            Err(_) => MigrationState::Failed,
        };
        log::debug!("Migration finished in state: {}", self.state);

        result
    }
}

/// Copy every immediate entry of `source` into `destination`.
///
/// Directories are merged into any existing directory of the same name and
/// files are overwritten, keeping permissions and timestamps. `source` is
/// only read.
///
/// A missing or empty source is not an error: it yields
/// [`MigrationResult::NoOp`]. A missing source leaves the destination
/// untouched; an empty one still gets the destination created.
///
/// # Arguments
///
/// * `source` - Directory to copy from
/// * `destination` - Directory to copy into, created if missing
/// * `on_event` - Callback for progress events
///
/// # Errors
///
/// * If the destination cannot be created
/// * If the source cannot be listed or an entry cannot be inspected
/// * If any copy fails; the remaining entries are not attempted
pub fn migrate<F>(
    source: &Path,
    destination: &Path,
    mut on_event: F,
) -> Result<MigrationResult, MigrateError>
where
    F: FnMut(&MigrationEvent),
{
    log::debug!(
        "Migrating {} -> {}",
        source.display(),
        destination.display()
    );

    if !source.exists() {
        log::debug!("Source does not exist");
        on_event(&MigrationEvent::SourceMissing {
            source: source.to_path_buf(),
        });
        return Ok(MigrationResult::NoOp(NoOpReason::SourceMissing));
    }

    fs::create_dir_all(destination).map_err(|e| MigrateError::CreateDestination {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let entries = fs::read_dir(source)
        .and_then(|dir| dir.collect::<Result<Vec<_>, _>>())
        .map_err(|e| MigrateError::ReadSource {
            path: source.to_path_buf(),
            source: e,
        })?;

    if entries.is_empty() {
        log::debug!("Source is empty");
        on_event(&MigrationEvent::SourceEmpty {
            source: source.to_path_buf(),
        });
        return Ok(MigrationResult::NoOp(NoOpReason::SourceEmpty));
    }

    on_event(&MigrationEvent::Found {
        entries: entries.len(),
    });

    for entry in &entries {
        let entry_path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let target = destination.join(entry.file_name());

        // Follows symlinks, so a link to a directory is copied as a directory
        let metadata = fs::metadata(&entry_path).map_err(|e| MigrateError::InspectEntry {
            path: entry_path.clone(),
            source: e,
        })?;

        let kind = if metadata.is_dir() {
            log::debug!("Copying directory {name}");
            let files_copied = merge_directory(&entry_path, &target, |progress| {
                on_event(&MigrationEvent::DirectoryProgress {
                    name: name.clone(),
                    progress: progress.clone(),
                });
            })?;
            log::debug!("Copied {files_copied} files from {name}");
            EntryKind::Directory
        } else {
            log::debug!("Copying file {name}");
            overwrite_file(&entry_path, &target)?;
            EntryKind::File
        };

        on_event(&MigrationEvent::Copied { name, kind });
    }

    on_event(&MigrationEvent::Completed {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        entries: entries.len(),
    });

    Ok(MigrationResult::Migrated {
        entries: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_migrate_copy::{CopyError, CopyProgress};
    use filetime::{FileTime, set_file_times};
    use tempfile::TempDir;

    fn run_collecting(
        source: &Path,
        destination: &Path,
    ) -> (Result<MigrationResult, MigrateError>, Vec<MigrationEvent>) {
        let mut events = Vec::new();
        let result = migrate(source, destination, |event| events.push(event.clone()));
        (result, events)
    }

    fn copied_names(events: &[MigrationEvent]) -> Vec<(String, EntryKind)> {
        let mut copied: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                MigrationEvent::Copied { name, kind } => Some((name.clone(), *kind)),
                _ => None,
            })
            .collect();
        copied.sort_by(|a, b| a.0.cmp(&b.0));
        copied
    }

    #[test]
    fn test_migrate_source_missing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src/chroma/data");
        let destination = dir.path().join("src/chroma_mcp/data");

        let (result, events) = run_collecting(&source, &destination);

        assert_eq!(
            result.unwrap(),
            MigrationResult::NoOp(NoOpReason::SourceMissing)
        );
        assert!(!destination.exists());
        assert_eq!(events, vec![MigrationEvent::SourceMissing { source }]);
    }

    #[test]
    fn test_migrate_source_empty() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("new");
        fs::create_dir_all(&source).unwrap();

        let (result, events) = run_collecting(&source, &destination);

        let result = result.unwrap();
        assert_eq!(result, MigrationResult::NoOp(NoOpReason::SourceEmpty));
        assert!(!result.is_migrated());
        assert_eq!(events, vec![MigrationEvent::SourceEmpty { source }]);
    }

    #[test]
    fn test_migrate_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("nested/new");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("a.txt"), "hello").unwrap();
        fs::write(source.join("sub/b.txt"), "world").unwrap();

        let (result, events) = run_collecting(&source, &destination);

        let result = result.unwrap();
        assert_eq!(result, MigrationResult::Migrated { entries: 2 });
        assert!(result.is_migrated());
        assert_eq!(
            fs::read_to_string(destination.join("a.txt")).unwrap(),
            "hello"
        );
        assert_eq!(
            fs::read_to_string(destination.join("sub/b.txt")).unwrap(),
            "world"
        );

        assert_eq!(events.first(), Some(&MigrationEvent::Found { entries: 2 }));
        assert_eq!(
            copied_names(&events),
            vec![
                ("a.txt".to_string(), EntryKind::File),
                ("sub".to_string(), EntryKind::Directory),
            ]
        );
        assert!(events.contains(&MigrationEvent::DirectoryProgress {
            name: "sub".to_string(),
            progress: CopyProgress::new(1, 0, None),
        }));
        assert!(matches!(
            events.last(),
            Some(MigrationEvent::Completed { entries: 2, .. })
        ));
    }

    #[test]
    fn test_migrate_leaves_source_intact() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("new");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("a.txt"), "hello").unwrap();
        fs::write(source.join("sub/b.txt"), "world").unwrap();

        run_collecting(&source, &destination).0.unwrap();

        assert_eq!(fs::read_to_string(source.join("a.txt")).unwrap(), "hello");
        assert_eq!(
            fs::read_to_string(source.join("sub/b.txt")).unwrap(),
            "world"
        );
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("new");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("a.txt"), "hello").unwrap();
        fs::write(source.join("sub/b.txt"), "world").unwrap();

        run_collecting(&source, &destination).0.unwrap();
        let second = run_collecting(&source, &destination).0.unwrap();

        assert_eq!(second, MigrationResult::Migrated { entries: 2 });
        let mut names: Vec<_> = fs::read_dir(&destination)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "sub"]);
        assert_eq!(
            fs::read_to_string(destination.join("sub/b.txt")).unwrap(),
            "world"
        );
    }

    #[test]
    fn test_migrate_merges_into_existing_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("new");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::create_dir_all(destination.join("sub")).unwrap();
        fs::write(source.join("sub/shared.txt"), "source").unwrap();
        fs::write(destination.join("sub/shared.txt"), "stale").unwrap();
        fs::write(destination.join("sub/extra.txt"), "keep").unwrap();
        fs::write(destination.join("top.txt"), "untouched").unwrap();

        run_collecting(&source, &destination).0.unwrap();

        assert_eq!(
            fs::read_to_string(destination.join("sub/shared.txt")).unwrap(),
            "source"
        );
        assert_eq!(
            fs::read_to_string(destination.join("sub/extra.txt")).unwrap(),
            "keep"
        );
        assert_eq!(
            fs::read_to_string(destination.join("top.txt")).unwrap(),
            "untouched"
        );
    }

    #[test]
    fn test_migrate_preserves_file_timestamps() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("new");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("chroma.sqlite3"), "db").unwrap();
        let mtime = FileTime::from_unix_time(1_650_000_000, 0);
        set_file_times(source.join("chroma.sqlite3"), mtime, mtime).unwrap();

        run_collecting(&source, &destination).0.unwrap();

        let meta = fs::metadata(destination.join("chroma.sqlite3")).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), mtime);
    }

    #[test]
    fn test_migrate_source_is_a_file_fails() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("not_a_dir");
        let destination = dir.path().join("new");
        fs::write(&source, "oops").unwrap();

        let (result, _) = run_collecting(&source, &destination);

        assert!(matches!(result, Err(MigrateError::ReadSource { .. })));
    }

    #[test]
    fn test_migrate_aborts_on_first_failed_entry() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        let destination = dir.path().join("new");
        fs::create_dir_all(&destination).unwrap();
        for blocked in ["blocked_a", "blocked_b"] {
            fs::create_dir_all(source.join(blocked)).unwrap();
            fs::write(source.join(blocked).join("inner.txt"), "x").unwrap();
            // A file where the directory should go makes the merge fail
            fs::write(destination.join(blocked), "in the way").unwrap();
        }
        fs::write(source.join("good.txt"), "fine").unwrap();

        let (result, events) = run_collecting(&source, &destination);

        assert!(matches!(
            result,
            Err(MigrateError::Copy(CopyError::CreateDirError { .. }))
        ));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, MigrationEvent::Completed { .. }))
        );

        // Only entries listed before the failure were copied, and they stay
        let copied = copied_names(&events);
        assert!(copied.len() <= 1);
        assert!(copied.iter().all(|(name, _)| name == "good.txt"));
        assert_eq!(
            destination.join("good.txt").exists(),
            copied.iter().any(|(name, _)| name == "good.txt")
        );
        for blocked in ["blocked_a", "blocked_b"] {
            assert!(destination.join(blocked).is_file());
        }
    }

    #[test]
    fn test_migrator_tracks_state() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.txt"), "hello").unwrap();

        let mut migrator = Migrator::new(MigrationPaths::new(&source, dir.path().join("new")));
        assert_eq!(migrator.state(), MigrationState::NotStarted);

        let result = migrator.run(|_| {}).unwrap();

        assert_eq!(result, MigrationResult::Migrated { entries: 1 });
        assert_eq!(migrator.state(), MigrationState::Completed);
    }

    #[test]
    fn test_migrator_noop_state() {
        let dir = TempDir::new().unwrap();
        let mut migrator = Migrator::new(MigrationPaths::from_root(dir.path()));

        migrator.run(|_| {}).unwrap();

        assert_eq!(migrator.state(), MigrationState::NoOp);
    }

    #[test]
    fn test_migrator_failed_state() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old");
        fs::write(&source, "file, not directory").unwrap();

        let mut migrator = Migrator::new(MigrationPaths::new(&source, dir.path().join("new")));

        assert!(migrator.run(|_| {}).is_err());
        assert_eq!(migrator.state(), MigrationState::Failed);
    }

    #[test]
    fn test_migrator_runs_once() {
        let dir = TempDir::new().unwrap();
        let mut migrator = Migrator::new(MigrationPaths::from_root(dir.path()));

        migrator.run(|_| {}).unwrap();
        let err = migrator.run(|_| {}).unwrap_err();

        assert!(matches!(
            err,
            MigrateError::AlreadyRun {
                state: MigrationState::NoOp
            }
        ));
    }
}
