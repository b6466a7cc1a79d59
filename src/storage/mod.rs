//! Storage layer for snapkeep
//!
//! Provides JSON file storage for schemas with atomic writes and automatic
//! directory creation.

pub mod file_io;
pub mod schemas;

pub use file_io::{read_json, write_json_atomic};
pub use schemas::SchemaRepository;
