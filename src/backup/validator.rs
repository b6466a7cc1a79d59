//! Schema precondition checks
//!
//! Run before any backup or clean touches the filesystem. Directory problems
//! stop the check at the first failure; every missing item is reported.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::Schema;

/// A single failed precondition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Base directory is empty or not an existing directory
    BaseDirectory(PathBuf),
    /// Backup directory is empty or not an existing directory
    BackupDirectory(PathBuf),
    /// An item does not exist as a file or directory
    MissingItem(PathBuf),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseDirectory(path) => {
                write!(f, "Base directory is invalid or not found: '{}'", path.display())
            }
            Self::BackupDirectory(path) => {
                write!(f, "Backup directory is invalid or not found: '{}'", path.display())
            }
            Self::MissingItem(path) => {
                write!(f, "Backup file is invalid or not found: '{}'", path.display())
            }
        }
    }
}

/// Outcome of validating one schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// One line per issue, for error messages
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn push(&mut self, schema: &Schema, issue: ValidationIssue) {
        log::error!("{} (schema '{}')", issue, schema.name);
        self.issues.push(issue);
    }
}

/// Check that a schema's directories and items exist
pub fn validate_schema(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();

    if is_blank(&schema.base_directory) || !schema.base_directory.is_dir() {
        report.push(schema, ValidationIssue::BaseDirectory(schema.base_directory.clone()));
        return report;
    }

    if is_blank(&schema.backup_directory) || !schema.backup_directory.is_dir() {
        report.push(
            schema,
            ValidationIssue::BackupDirectory(schema.backup_directory.clone()),
        );
        return report;
    }

    for path in schema.source_paths() {
        if !path.exists() {
            report.push(schema, ValidationIssue::MissingItem(path));
        }
    }

    report
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
