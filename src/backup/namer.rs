//! Snapshot directory naming

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::models::SnapshotName;

/// Pick an unused snapshot directory under `backup_dir` for a run at `now`
///
/// Tries the plain timestamp first, then `_1`, `_2`, ... Any existing entry
/// blocks a name, including a dangling symlink. Nothing is created on disk,
/// so calling this twice without creating the first result yields the same
/// path.
pub fn snapshot_name(backup_dir: &Path, now: DateTime<Utc>) -> PathBuf {
    let mut sequence = 0;
    loop {
        let candidate = backup_dir.join(SnapshotName::new(now, sequence).to_string());
        if fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
        sequence += 1;
    }
}
