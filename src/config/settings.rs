//! User settings for snapkeep
//!
//! Manages logging preferences. Every field carries a serde default so that
//! settings files written by older versions keep loading.

use serde::{Deserialize, Serialize};

use super::paths::SnapkeepPaths;
use crate::error::SnapkeepError;

/// Environment variable that overrides the configured log level
pub const LOG_ENV_VAR: &str = "SNAPKEEP_LOG";

/// User settings for snapkeep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Minimum level written to the console and log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether log records are also appended to the log file
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: default_log_level(),
            log_to_file: default_log_to_file(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SnapkeepPaths) -> Result<Self, SnapkeepError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SnapkeepError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SnapkeepError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SnapkeepPaths) -> Result<(), SnapkeepError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SnapkeepError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SnapkeepError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the effective log level, honouring `SNAPKEEP_LOG` first
    pub fn effective_log_level(&self) -> log::LevelFilter {
        std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .or_else(|| self.log_level.parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}
