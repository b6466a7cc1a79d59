//! Snapshot naming
//!
//! Snapshot directories are named `YYYY-MM-DD_HH-MM-SS` after the UTC second
//! they were started in, with an optional `_N` suffix when several runs land
//! in the same second. The directory listing of a backup directory is the only
//! index of snapshots, so this module owns both the pattern and the ordering.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// strftime format of the timestamp part of a snapshot name
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Full-name pattern for snapshot directories
pub static SNAPSHOT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})(?:_(\d+))?$")
        .expect("snapshot pattern is a valid regex")
});

/// A parsed snapshot directory name
///
/// Ordering compares the timestamp first and the disambiguator as an integer
/// second, so `X` < `X_1` < `X_2` < `X_10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotName {
    stamp: String,
    sequence: u64,
}

impl SnapshotName {
    /// Name for a run started at `now`; sequence 0 has no suffix
    pub fn new(now: DateTime<Utc>, sequence: u64) -> Self {
        Self {
            stamp: now.format(TIMESTAMP_FORMAT).to_string(),
            sequence,
        }
    }

    /// Parse a directory name, returning None unless it matches the pattern
    pub fn parse(name: &str) -> Option<Self> {
        let caps = SNAPSHOT_PATTERN.captures(name)?;
        let stamp = caps.get(1)?.as_str().to_string();
        let sequence = match caps.get(2) {
            // digits only, so the parse can fail solely on overflow
            Some(m) => m.as_str().parse().unwrap_or(u64::MAX),
            None => 0,
        };
        Some(Self { stamp, sequence })
    }

    /// The `YYYY-MM-DD_HH-MM-SS` part
    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// The `_N` disambiguator, 0 when absent
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Ord for SnapshotName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.stamp
            .cmp(&other.stamp)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for SnapshotName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sequence == 0 {
            write!(f, "{}", self.stamp)
        } else {
            write!(f, "{}_{}", self.stamp, self.sequence)
        }
    }
}

/// An existing snapshot directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub name: SnapshotName,
    pub path: PathBuf,
}
