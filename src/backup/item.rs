//! Copying a single schema item into a snapshot
//!
//! A directory item is mirrored in two passes: every directory of the tree is
//! created first, then every file is copied. Files never overwrite anything;
//! snapshot directories are always fresh, so an existing destination means
//! something else is writing into the snapshot.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::Schema;

/// One schema item, resolved and ready to copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupItem {
    /// The item string as written in the schema
    pub relative_name: String,
    /// base directory + item
    pub source_path: PathBuf,
    /// snapshot directory + item
    pub destination_path: PathBuf,
}

impl BackupItem {
    /// Resolve `item` for a snapshot, or None (logged) if the source is gone
    pub fn resolve(schema: &Schema, item: &str, snapshot_dir: &Path) -> Option<Self> {
        let source_path = schema.resolve_item(item);
        if !source_path.exists() {
            log::error!(
                "Backup file is invalid or not found ({}). Path: {}",
                item,
                source_path.display()
            );
            return None;
        }

        Some(Self {
            relative_name: item.to_string(),
            destination_path: snapshot_dir.join(contained(item)),
            source_path,
        })
    }

    /// Copy the item into the snapshot, returning the number of files copied
    pub fn perform(&self) -> SnapkeepResult<u64> {
        log::info!("--> {}", self.source_path.display());

        if self.source_path.is_dir() {
            copy_tree(&self.source_path, &self.destination_path)
        } else {
            copy_file(&self.source_path, &self.destination_path)?;
            Ok(1)
        }
    }
}

/// Keep only the normal components of an item so that absolute or `..`
/// items still land inside the snapshot
fn contained(item: &str) -> PathBuf {
    Path::new(item)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Mirror the tree rooted at `source` under `destination`
fn copy_tree(source: &Path, destination: &Path) -> SnapkeepResult<u64> {
    let mut dirs = vec![source.to_path_buf()];
    let mut files = Vec::new();
    collect_tree(source, &mut dirs, &mut files)?;

    for dir in &dirs {
        let target = mirror(source, dir, destination)?;
        fs::create_dir_all(&target).map_err(|e| {
            SnapkeepError::Io(format!("Failed to create {}: {}", target.display(), e))
        })?;
    }

    for file in &files {
        copy_file(file, &mirror(source, file, destination)?)?;
    }

    Ok(files.len() as u64)
}

/// Depth-first listing of every directory and file below `dir`
fn collect_tree(dir: &Path, dirs: &mut Vec<PathBuf>, files: &mut Vec<PathBuf>) -> SnapkeepResult<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| SnapkeepError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            SnapkeepError::Io(format!("Failed to read entry in {}: {}", dir.display(), e))
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| {
            SnapkeepError::Io(format!("Failed to inspect {}: {}", path.display(), e))
        })?;
        paths.push((path, file_type));
    }
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in paths {
        if file_type.is_dir() {
            dirs.push(path.clone());
            collect_tree(&path, dirs, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            log::warn!("Skipping symlinked directory {}", path.display());
        } else {
            files.push(path);
        }
    }

    Ok(())
}

/// Re-root `path` from `source` onto `destination`
fn mirror(source: &Path, path: &Path, destination: &Path) -> SnapkeepResult<PathBuf> {
    let relative = path.strip_prefix(source).map_err(|_| {
        SnapkeepError::Io(format!(
            "{} is not inside {}",
            path.display(),
            source.display()
        ))
    })?;
    Ok(destination.join(relative))
}

/// Byte-for-byte copy that refuses to replace an existing destination
fn copy_file(source: &Path, destination: &Path) -> SnapkeepResult<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SnapkeepError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let mut reader = File::open(source)
        .map_err(|e| SnapkeepError::Io(format!("Failed to open {}: {}", source.display(), e)))?;

    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => SnapkeepError::Io(format!(
                "Destination already exists: {}",
                destination.display()
            )),
            _ => SnapkeepError::Io(format!("Failed to create {}: {}", destination.display(), e)),
        })?;

    io::copy(&mut reader, &mut writer).map_err(|e| {
        SnapkeepError::Io(format!(
            "Failed to copy {} to {}: {}",
            source.display(),
            destination.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn schema_for(base: &Path) -> Schema {
        let mut schema = Schema::template("docs");
        schema.base_directory = base.to_path_buf();
        schema
    }

    #[test]
    fn test_resolve_missing_item() {
        let temp = TempDir::new().unwrap();
        let schema = schema_for(temp.path());

        assert!(BackupItem::resolve(&schema, "missing.txt", &temp.path().join("snap")).is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let schema = schema_for(temp.path());
        let snap = temp.path().join("snap");

        let item = BackupItem::resolve(&schema, "a.txt", &snap).unwrap();
        assert_eq!(item.relative_name, "a.txt");
        assert_eq!(item.source_path, temp.path().join("a.txt"));
        assert_eq!(item.destination_path, snap.join("a.txt"));
    }

    #[test]
    fn test_contained_drops_root_and_parent_components() {
        assert_eq!(contained("a/b.txt"), PathBuf::from("a/b.txt"));
        assert_eq!(contained("../x/./y"), PathBuf::from("x/y"));
        assert_eq!(contained("sub/"), PathBuf::from("sub"));
    }

    #[test]
    fn test_copy_nested_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("src");
        fs::create_dir_all(base.join("deep/er")).unwrap();
        fs::write(base.join("deep/er/file.bin"), [0u8, 1, 2, 255]).unwrap();
        let snap = temp.path().join("snap");

        let item = BackupItem::resolve(&schema_for(&base), "deep/er/file.bin", &snap).unwrap();
        assert_eq!(item.perform().unwrap(), 1);
        assert_eq!(fs::read(snap.join("deep/er/file.bin")).unwrap(), vec![0u8, 1, 2, 255]);
    }

    #[test]
    fn test_copy_directory_tree() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("src");
        fs::create_dir_all(base.join("tree/a/b")).unwrap();
        fs::create_dir_all(base.join("tree/empty")).unwrap();
        fs::write(base.join("tree/top.txt"), "top").unwrap();
        fs::write(base.join("tree/a/b/leaf.txt"), "leaf").unwrap();
        let snap = temp.path().join("snap");

        let item = BackupItem::resolve(&schema_for(&base), "tree", &snap).unwrap();
        assert_eq!(item.perform().unwrap(), 2);

        assert_eq!(fs::read_to_string(snap.join("tree/top.txt")).unwrap(), "top");
        assert_eq!(fs::read_to_string(snap.join("tree/a/b/leaf.txt")).unwrap(), "leaf");
        assert!(snap.join("tree/empty").is_dir());
    }

    #[test]
    fn test_tree_with_repeated_name_segments() {
        // A string replace of "data" would also rewrite the nested "data" segment
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("data");
        fs::create_dir_all(base.join("data/data")).unwrap();
        fs::write(base.join("data/data/x.txt"), "x").unwrap();
        let snap = temp.path().join("snap");

        let item = BackupItem::resolve(&schema_for(temp.path()), "data", &snap).unwrap();
        item.perform().unwrap();

        assert_eq!(fs::read_to_string(snap.join("data/data/data/x.txt")).unwrap(), "x");
    }

    #[test]
    fn test_existing_destination_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "new").unwrap();
        let snap = temp.path().join("snap");
        fs::create_dir_all(&snap).unwrap();
        fs::write(snap.join("a.txt"), "old").unwrap();

        let item = BackupItem::resolve(&schema_for(temp.path()), "a.txt", &snap).unwrap();
        let err = item.perform().unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(snap.join("a.txt")).unwrap(), "old");
    }
}
