//! Path management for snapkeep
//!
//! Provides XDG-compliant path resolution for the schema store, settings and
//! the log file.
//!
//! ## Path Resolution Order
//!
//! 1. `SNAPKEEP_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/snapkeep` or `~/.config/snapkeep`
//! 3. Windows: `%APPDATA%\snapkeep`

use std::path::PathBuf;

use crate::error::SnapkeepError;

/// Environment variable that overrides the home directory
pub const HOME_ENV_VAR: &str = "SNAPKEEP_HOME";

/// Manages all paths used by snapkeep
#[derive(Debug, Clone)]
pub struct SnapkeepPaths {
    /// Base directory for all snapkeep state
    base_dir: PathBuf,
}

impl SnapkeepPaths {
    /// Create a new SnapkeepPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, SnapkeepError> {
        let base_dir = match std::env::var(HOME_ENV_VAR) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SnapkeepPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/snapkeep/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per schema
    pub fn schema_dir(&self) -> PathBuf {
        self.base_dir.join("schemas")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("snapkeep.log")
    }

    /// Ensure the base and schema directories exist
    pub fn ensure_directories(&self) -> Result<(), SnapkeepError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SnapkeepError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.schema_dir())
            .map_err(|e| SnapkeepError::Io(format!("Failed to create schema directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SnapkeepError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SnapkeepError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("snapkeep"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SnapkeepError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SnapkeepError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("snapkeep"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SnapkeepPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.schema_dir(), temp_dir.path().join("schemas"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("snapkeep.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(HOME_ENV_VAR, custom_path);
        let paths = SnapkeepPaths::new().unwrap();
        env::remove_var(HOME_ENV_VAR);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SnapkeepPaths::with_base_dir(temp_dir.path().join("home"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().is_dir());
        assert!(paths.schema_dir().is_dir());
    }
}
