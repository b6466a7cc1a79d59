//! snapkeep - declarative snapshot backups
//!
//! Users describe named schemas (a base directory, the files and directories
//! to copy from it, a backup directory and a retention count). Executing a
//! schema copies its items into a freshly timestamped snapshot directory;
//! cleaning a schema deletes all but its newest snapshots.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Schema and snapshot-name models
//! - `storage`: JSON file storage for schemas
//! - `backup`: Validation, snapshot naming, copying and retention pruning
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//! - `logging`: `log` backend for console and file output
//!
//! # Example
//!
//! ```rust,ignore
//! use snapkeep::config::SnapkeepPaths;
//! use snapkeep::storage::SchemaRepository;
//!
//! let paths = SnapkeepPaths::new()?;
//! let mut repo = SchemaRepository::new(paths.schema_dir());
//! repo.load_all()?;
//!
//! if let Some(schema) = repo.find_by_name("docs") {
//!     snapkeep::backup::execute_schema(schema)?;
//! }
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{SnapkeepError, SnapkeepResult};
