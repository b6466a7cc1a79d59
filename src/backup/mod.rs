//! Snapshot backups and retention for snapkeep
//!
//! # Architecture
//!
//! - `validator`: precondition checks on a schema's directories and items
//! - `namer`: picks a collision-free snapshot directory name
//! - `item`: copies one file or directory tree into a snapshot
//! - `executor`: runs a whole schema into a new snapshot
//! - `pruner`: lists snapshots and deletes all but the newest N
//! - `sweep`: runs the executor or pruner over every schema
//!
//! # Snapshot Layout
//!
//! ```text
//! <Backup Directory>/
//!     2024-06-01_12-00-00/      one directory per run, UTC second
//!     2024-06-01_12-00-00_1/    second run within the same second
//!     anything-else/            never touched by cleaning
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use snapkeep::backup::{clean_schema, execute_schema};
//!
//! let report = execute_schema(&schema)?;
//! println!("Backed up {} item(s) into {}", report.backed_up, report.snapshot_dir.display());
//!
//! let cleaned = clean_schema(&schema)?;
//! println!("Deleted {} snapshot(s)", cleaned.deleted.len());
//! ```

mod executor;
mod item;
mod namer;
mod pruner;
mod sweep;
mod validator;

pub use executor::{execute_schema, execute_schema_at, ExecutionReport, ItemFailure};
pub use item::BackupItem;
pub use namer::snapshot_name;
pub use pruner::{clean_schema, list_snapshots, CleanReport, DeleteFailure};
pub use sweep::{clean_all, execute_all, SweepSummary};
pub use validator::{validate_schema, ValidationIssue, ValidationReport};
