//! Schema repository for JSON storage
//!
//! Keeps one `<name>.json` file per schema in the schema directory. The
//! repository is loaded once at startup and handed to whatever needs lookups.

use std::path::{Path, PathBuf};

use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::Schema;

use super::file_io::{list_json_files, read_json, write_json_atomic};

/// Repository for schema persistence
#[derive(Debug)]
pub struct SchemaRepository {
    dir: PathBuf,
    schemas: Vec<Schema>,
}

impl SchemaRepository {
    /// Create an empty repository rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            schemas: Vec::new(),
        }
    }

    /// Directory the schema files live in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every schema file, replacing anything loaded before
    ///
    /// Files that cannot be parsed are logged and skipped. Returns the number
    /// of schemas loaded.
    pub fn load_all(&mut self) -> SnapkeepResult<usize> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SnapkeepError::Storage(format!(
                "Failed to create schema directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        self.schemas.clear();
        for path in list_json_files(&self.dir)? {
            match read_json::<Schema, _>(&path) {
                Ok(schema) => self.schemas.push(schema),
                Err(e) => {
                    log::error!(
                        "Could not load schema, is it valid JSON? Path: {}\n{}",
                        path.display(),
                        e
                    );
                }
            }
        }

        log::debug!("Loaded {} schema(s) from {}", self.schemas.len(), self.dir.display());
        Ok(self.schemas.len())
    }

    /// All loaded schemas, in file-name order
    pub fn all(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Find a schema by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.matches_name(name))
    }

    /// Look up a schema by name, case-insensitively
    pub fn get(&self, name: &str) -> SnapkeepResult<&Schema> {
        self.find_by_name(name)
            .ok_or_else(|| SnapkeepError::schema_not_found(name))
    }

    /// File a schema with this name is stored in
    pub fn file_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Persist a schema to its file
    pub fn save(&self, schema: &Schema) -> SnapkeepResult<()> {
        validate_name(&schema.name)?;
        write_json_atomic(self.file_for(&schema.name), schema)
    }

    /// Write a blank schema template and add it to the loaded set
    pub fn create_template(&mut self, name: &str) -> SnapkeepResult<Schema> {
        let name = name.trim();
        validate_name(name)?;

        if self.find_by_name(name).is_some() || self.file_for(name).exists() {
            return Err(SnapkeepError::Duplicate {
                entity_type: "Schema",
                identifier: name.to_string(),
            });
        }

        let schema = Schema::template(name);
        self.save(&schema)?;
        self.schemas.push(schema.clone());
        Ok(schema)
    }
}

/// Schema names double as file names
fn validate_name(name: &str) -> SnapkeepResult<()> {
    if name.trim().is_empty() {
        return Err(SnapkeepError::Validation(
            "Schema name cannot be empty".into(),
        ));
    }

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(SnapkeepError::Validation(format!(
            "Schema name '{}' cannot contain path separators",
            name
        )));
    }

    Ok(())
}
