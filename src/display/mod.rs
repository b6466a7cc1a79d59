//! Display formatting for terminal output
//!
//! Provides utilities for formatting schemas and run reports for terminal
//! display.

pub mod schema;

pub use schema::{
    format_clean_report, format_execution_report, format_schema_list, format_sweep_summary,
    SchemaListing,
};
