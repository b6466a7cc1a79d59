//! Backup execution for one schema
//!
//! Validates the schema, picks a fresh snapshot directory, and copies every
//! item that still exists into it. A failing item is logged and recorded in
//! the report; the remaining items are still copied.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::Schema;

use super::item::BackupItem;
use super::namer::snapshot_name;
use super::validator::validate_schema;

/// An item whose copy failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub item: String,
    pub error: String,
}

/// Result of a backup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// The snapshot directory that was created
    pub snapshot_dir: PathBuf,
    /// Items copied without error
    pub backed_up: usize,
    /// Total files written across all items
    pub files_copied: u64,
    /// Items whose copy failed part way
    pub failures: Vec<ItemFailure>,
}

impl ExecutionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Back up a schema into a snapshot named after the current UTC time
pub fn execute_schema(schema: &Schema) -> SnapkeepResult<ExecutionReport> {
    execute_schema_at(schema, Utc::now())
}

/// Back up a schema into a snapshot named after `now`
pub fn execute_schema_at(schema: &Schema, now: DateTime<Utc>) -> SnapkeepResult<ExecutionReport> {
    let validation = validate_schema(schema);
    if !validation.is_valid() {
        return Err(SnapkeepError::Validation(format!(
            "Schema '{}' is invalid: {}",
            schema.name,
            validation.summary()
        )));
    }

    let snapshot_dir = snapshot_name(schema.backup_dir(), now);
    log::info!("Timestamp: {}", now.format("%Y-%m-%d %H:%M:%S UTC"));
    log::info!("Backup directory: {}", snapshot_dir.display());

    // The filesystem may have changed since validation
    let items: Vec<BackupItem> = schema
        .items
        .iter()
        .filter_map(|item| BackupItem::resolve(schema, item, &snapshot_dir))
        .collect();

    if items.is_empty() {
        log::error!("No files were found to back up. Bailing...");
        return Err(SnapkeepError::NothingToBackUp(schema.name.clone()));
    }

    fs::create_dir(&snapshot_dir).map_err(|e| {
        SnapkeepError::Io(format!(
            "Failed to create snapshot directory {}: {}",
            snapshot_dir.display(),
            e
        ))
    })?;

    log::info!("Backing up {} item(s).", items.len());

    let mut report = ExecutionReport {
        snapshot_dir,
        backed_up: 0,
        files_copied: 0,
        failures: Vec::new(),
    };

    for item in &items {
        match item.perform() {
            Ok(files) => {
                report.backed_up += 1;
                report.files_copied += files;
            }
            Err(e) => {
                log::error!("Failed to back up '{}': {}", item.relative_name, e);
                report.failures.push(ItemFailure {
                    item: item.relative_name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if report.is_complete() {
        log::info!("Backup complete.");
    } else {
        log::warn!(
            "Backup finished with {} failed item(s) and {} backed up.",
            report.failures.len(),
            report.backed_up
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn setup(temp: &TempDir) -> Schema {
        let base = temp.path().join("src");
        let bak = temp.path().join("bak");
        fs::create_dir_all(base.join("sub")).unwrap();
        fs::create_dir_all(&bak).unwrap();
        fs::write(base.join("a.txt"), "alpha").unwrap();
        fs::write(base.join("sub/b.txt"), "beta").unwrap();

        let mut schema = Schema::template("docs");
        schema.base_directory = base;
        schema.backup_directory = bak;
        schema.items = vec!["a.txt".into(), "sub/".into()];
        schema
    }

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_execute_copies_files_and_trees() {
        let temp = TempDir::new().unwrap();
        let schema = setup(&temp);

        let report = execute_schema_at(&schema, now()).unwrap();

        assert_eq!(report.snapshot_dir, schema.backup_directory.join("2024-06-01_12-00-00"));
        assert_eq!(report.backed_up, 2);
        assert_eq!(report.files_copied, 2);
        assert!(report.is_complete());
        assert_eq!(fs::read_to_string(report.snapshot_dir.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(report.snapshot_dir.join("sub/b.txt")).unwrap(), "beta");
    }

    #[test]
    fn test_same_second_runs_get_distinct_snapshots() {
        let temp = TempDir::new().unwrap();
        let schema = setup(&temp);

        let first = execute_schema_at(&schema, now()).unwrap();
        let second = execute_schema_at(&schema, now()).unwrap();

        assert_eq!(
            second.snapshot_dir,
            schema.backup_directory.join("2024-06-01_12-00-00_1")
        );
        assert_ne!(first.snapshot_dir, second.snapshot_dir);
        assert!(second.snapshot_dir.join("a.txt").exists());
    }

    #[test]
    fn test_missing_base_directory_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut schema = setup(&temp);
        schema.base_directory = temp.path().join("missing");

        let err = execute_schema_at(&schema, now()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(entries(&schema.backup_directory), 0);
    }

    #[test]
    fn test_missing_item_aborts_whole_run() {
        let temp = TempDir::new().unwrap();
        let mut schema = setup(&temp);
        schema.items.push("gone.txt".into());

        let err = execute_schema_at(&schema, now()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("gone.txt"));
        assert_eq!(entries(&schema.backup_directory), 0);
    }

    #[test]
    fn test_no_items_creates_no_snapshot() {
        let temp = TempDir::new().unwrap();
        let mut schema = setup(&temp);
        schema.items.clear();

        let err = execute_schema_at(&schema, now()).unwrap_err();
        assert!(matches!(err, SnapkeepError::NothingToBackUp(_)));
        assert_eq!(entries(&schema.backup_directory), 0);
    }

    #[test]
    fn test_failed_item_does_not_stop_the_rest() {
        let temp = TempDir::new().unwrap();
        let mut schema = setup(&temp);
        // The tree copy of "sub" already wrote sub/b.txt, so the second item collides
        schema.items = vec!["sub".into(), "sub/b.txt".into(), "a.txt".into()];

        let report = execute_schema_at(&schema, now()).unwrap();

        assert_eq!(report.backed_up, 2);
        assert_eq!(report.files_copied, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item, "sub/b.txt");
        assert!(report.failures[0].error.contains("already exists"));
        assert!(!report.is_complete());
        assert_eq!(fs::read_to_string(report.snapshot_dir.join("sub/b.txt")).unwrap(), "beta");
        assert_eq!(fs::read_to_string(report.snapshot_dir.join("a.txt")).unwrap(), "alpha");
    }
}
