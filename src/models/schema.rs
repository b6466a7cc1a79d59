//! Schema model
//!
//! A schema is a named backup configuration: a base directory, the items
//! (relative file or directory paths) to copy from it, the directory that
//! receives timestamped snapshots, and how many snapshots to keep.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Keep count written into fresh templates and assumed for older files
pub const DEFAULT_KEEP_COUNT: i64 = 5;

/// A named backup configuration
///
/// The serialized field names are a stable external format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique name, compared case-insensitively
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Root that every item is resolved against
    #[serde(rename = "Base Directory", default)]
    pub base_directory: PathBuf,

    /// Parent of the timestamped snapshot directories
    #[serde(rename = "Backup Directory", default)]
    pub backup_directory: PathBuf,

    /// Number of newest snapshots kept by a clean; zero or less disables pruning
    #[serde(rename = "Clean Keep Count", default = "default_keep_count")]
    pub keep_count: i64,

    /// Items relative to the base directory, in backup order
    #[serde(rename = "Files", default)]
    pub items: Vec<String>,
}

fn default_keep_count() -> i64 {
    DEFAULT_KEEP_COUNT
}

impl Schema {
    /// Create a blank schema template with the given name
    pub fn template(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_directory: PathBuf::new(),
            backup_directory: PathBuf::new(),
            keep_count: DEFAULT_KEEP_COUNT,
            items: Vec::new(),
        }
    }

    /// Case-insensitive name comparison
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Absolute source path for one item
    pub fn resolve_item(&self, item: &str) -> PathBuf {
        self.base_directory.join(item)
    }

    /// Source paths for every item, in declared order
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.items.iter().map(|item| self.resolve_item(item)).collect()
    }

    /// Whether this schema asks for old snapshots to be pruned
    pub fn pruning_enabled(&self) -> bool {
        self.keep_count > 0
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_directory
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_defaults() {
        let schema = Schema::template("docs");
        assert_eq!(schema.name, "docs");
        assert_eq!(schema.keep_count, DEFAULT_KEEP_COUNT);
        assert!(schema.items.is_empty());
        assert!(schema.base_directory.as_os_str().is_empty());
    }

    #[test]
    fn test_matches_name_ignores_case() {
        let schema = Schema::template("My Documents");
        assert!(schema.matches_name("my documents"));
        assert!(schema.matches_name("MY DOCUMENTS"));
        assert!(!schema.matches_name("documents"));
    }

    #[test]
    fn test_resolve_items() {
        let mut schema = Schema::template("docs");
        schema.base_directory = PathBuf::from("/src");
        schema.items = vec!["a.txt".into(), "sub/b.txt".into()];

        assert_eq!(schema.resolve_item("a.txt"), PathBuf::from("/src/a.txt"));
        assert_eq!(
            schema.source_paths(),
            vec![PathBuf::from("/src/a.txt"), PathBuf::from("/src/sub/b.txt")]
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let mut schema = Schema::template("docs");
        schema.items = vec!["readme.txt".into()];

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["Name"], "docs");
        assert_eq!(json["Clean Keep Count"], 5);
        assert_eq!(json["Files"][0], "readme.txt");
        assert!(json.get("Base Directory").is_some());
        assert!(json.get("Backup Directory").is_some());
    }

    #[test]
    fn test_missing_keep_count_defaults() {
        let json = r#"{
            "Name": "legacy",
            "Base Directory": "/src",
            "Backup Directory": "/bak",
            "Files": ["a.txt"]
        }"#;

        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.keep_count, DEFAULT_KEEP_COUNT);
        assert_eq!(schema.items, vec!["a.txt".to_string()]);
        assert!(schema.pruning_enabled());
    }

    #[test]
    fn test_non_positive_keep_count_disables_pruning() {
        let mut schema = Schema::template("docs");
        schema.keep_count = 0;
        assert!(!schema.pruning_enabled());
        schema.keep_count = -3;
        assert!(!schema.pruning_enabled());
    }
}
