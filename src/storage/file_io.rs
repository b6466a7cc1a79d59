//! File I/O utilities with atomic writes
//!
//! Schema files are edited by hand, so reads report the offending path and
//! writes never leave a half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SnapkeepError;

/// Read and parse a JSON file that must exist
pub fn read_json<T, P>(path: P) -> Result<T, SnapkeepError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| SnapkeepError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SnapkeepError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SnapkeepError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SnapkeepError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SnapkeepError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SnapkeepError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SnapkeepError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SnapkeepError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SnapkeepError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// List the `*.json` files directly inside `dir`, sorted by file name
pub fn list_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, SnapkeepError> {
    let dir = dir.as_ref();

    let entries = fs::read_dir(dir).map_err(|e| {
        SnapkeepError::Storage(format!("Failed to read {}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| SnapkeepError::Storage(format!("Failed to read directory entry: {}", e)))?
            .path();

        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_read_invalid_json_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, SnapkeepError::Storage(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_list_json_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.json")).unwrap();

        let files = list_json_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }
}
