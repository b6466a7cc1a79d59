//! Core data models for snapkeep
//!
//! Schemas describe what to back up; snapshots are what a backup run leaves
//! behind in a schema's backup directory.

pub mod schema;
pub mod snapshot;

pub use schema::{Schema, DEFAULT_KEEP_COUNT};
pub use snapshot::{Snapshot, SnapshotName, SNAPSHOT_PATTERN, TIMESTAMP_FORMAT};
