//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup engine.

pub mod schema;

pub use schema::{
    handle_clean, handle_clean_all, handle_config, handle_execute, handle_execute_all,
    handle_list, handle_template, join_name,
};
