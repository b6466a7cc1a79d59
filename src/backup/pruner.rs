//! Retention pruning
//!
//! Snapshots are found by listing the schema's backup directory and keeping
//! the subdirectories whose names parse as snapshot names. Anything else in
//! the backup directory is left alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::{Schema, Snapshot, SnapshotName};

use super::validator::validate_schema;

/// A snapshot that could not be deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a clean run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// True when the schema has pruning turned off
    pub skipped: bool,
    /// Snapshots left in place, newest first
    pub retained: Vec<PathBuf>,
    /// Snapshots removed
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<DeleteFailure>,
}

/// List the snapshot directories in `backup_dir`, newest first
pub fn list_snapshots(backup_dir: &Path) -> SnapkeepResult<Vec<Snapshot>> {
    let entries = fs::read_dir(backup_dir).map_err(|e| {
        SnapkeepError::Io(format!(
            "Failed to read backup directory {}: {}",
            backup_dir.display(),
            e
        ))
    })?;

    let mut snapshots = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| SnapkeepError::Io(format!("Failed to read directory entry: {}", e)))?;

        if !entry.file_type()?.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str().and_then(SnapshotName::parse) {
            snapshots.push(Snapshot {
                name,
                path: entry.path(),
            });
        }
    }

    snapshots.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(snapshots)
}

/// Delete all but the `keep_count` newest snapshots of a schema
pub fn clean_schema(schema: &Schema) -> SnapkeepResult<CleanReport> {
    let validation = validate_schema(schema);
    if !validation.is_valid() {
        return Err(SnapkeepError::Validation(format!(
            "Schema '{}' is invalid: {}",
            schema.name,
            validation.summary()
        )));
    }

    if !schema.pruning_enabled() {
        log::info!(
            "Clean Keep Count is {} for schema '{}', nothing to clean.",
            schema.keep_count,
            schema.name
        );
        return Ok(CleanReport {
            skipped: true,
            ..CleanReport::default()
        });
    }

    let snapshots = list_snapshots(schema.backup_dir())?;
    let keep = usize::try_from(schema.keep_count).unwrap_or(usize::MAX);

    log::info!(
        "Found {} snapshot(s), keeping the newest {}.",
        snapshots.len(),
        keep.min(snapshots.len())
    );

    let report = prune(snapshots, keep, |path| fs::remove_dir_all(path));
    log::info!("Deleted {} snapshot(s).", report.deleted.len());
    Ok(report)
}

/// Keep the first `keep` of `snapshots` (newest first) and hand the rest to
/// `remove`. A failed removal is recorded and the rest are still attempted.
fn prune<F>(snapshots: Vec<Snapshot>, keep: usize, mut remove: F) -> CleanReport
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut report = CleanReport::default();
    for (index, snapshot) in snapshots.into_iter().enumerate() {
        if index < keep {
            report.retained.push(snapshot.path);
            continue;
        }

        match remove(&snapshot.path) {
            Ok(()) => {
                log::info!("Deleted {}", snapshot.path.display());
                report.deleted.push(snapshot.path);
            }
            Err(e) => {
                log::error!("Failed to delete {}: {}", snapshot.path.display(), e);
                report.failures.push(DeleteFailure {
                    path: snapshot.path,
                    error: e.to_string(),
                });
            }
        }
    }
    report
}
