//! Custom error types for snapkeep
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for snapkeep operations
#[derive(Error, Debug)]
pub enum SnapkeepError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A schema failed its precondition checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// None of a schema's items were present when the backup started
    #[error("No files were found to back up for schema '{0}'")]
    NothingToBackUp(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SnapkeepError {
    /// Create a "not found" error for schemas
    pub fn schema_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Schema",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SnapkeepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SnapkeepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for snapkeep operations
pub type SnapkeepResult<T> = Result<T, SnapkeepError>;
