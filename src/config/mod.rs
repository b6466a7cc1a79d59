//! Configuration module for snapkeep
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SnapkeepPaths;
pub use settings::Settings;
