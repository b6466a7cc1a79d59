//! Schema and run report formatting
//!
//! Formats schemas and backup/clean results for terminal output.

use std::path::Path;

use crate::backup::{CleanReport, ExecutionReport, SweepSummary};
use crate::models::Schema;

/// A schema plus the number of snapshots currently on disk
#[derive(Debug, Clone)]
pub struct SchemaListing<'a> {
    pub schema: &'a Schema,
    /// None when the backup directory could not be read
    pub snapshot_count: Option<usize>,
}

/// Format loaded schemas as a table
pub fn format_schema_list(listings: &[SchemaListing]) -> String {
    if listings.is_empty() {
        return "No schemas were found.\n".to_string();
    }

    let name_width = listings
        .iter()
        .map(|l| l.schema.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!("Listing {} schema(s):\n\n", listings.len()));
    output.push_str(&format!(
        "{:<name_width$}  {:>5}  {:>4}  {:>9}  {}\n",
        "Name",
        "Files",
        "Keep",
        "Snapshots",
        "Backup Directory",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->5}  {:->4}  {:->9}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for listing in listings {
        let schema = listing.schema;
        let keep = if schema.pruning_enabled() {
            schema.keep_count.to_string()
        } else {
            "off".to_string()
        };
        let snapshots = listing
            .snapshot_count
            .map_or_else(|| "-".to_string(), |n| n.to_string());

        output.push_str(&format!(
            "{:<name_width$}  {:>5}  {:>4}  {:>9}  {}\n",
            schema.name,
            schema.items.len(),
            keep,
            snapshots,
            display_dir(&schema.backup_directory),
            name_width = name_width,
        ));
    }

    output
}

/// Format the result of a single backup run
pub fn format_execution_report(report: &ExecutionReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("Snapshot: {}\n", report.snapshot_dir.display()));
    output.push_str(&format!(
        "  Items backed up: {} ({} file(s))\n",
        report.backed_up, report.files_copied
    ));

    if !report.failures.is_empty() {
        output.push_str(&format!("  Items failed:    {}\n", report.failures.len()));
        for failure in &report.failures {
            output.push_str(&format!("    {} - {}\n", failure.item, failure.error));
        }
    }

    output
}

/// Format the result of a single clean run
pub fn format_clean_report(report: &CleanReport) -> String {
    if report.skipped {
        return "Pruning is disabled for this schema.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("  Snapshots kept:    {}\n", report.retained.len()));
    output.push_str(&format!("  Snapshots deleted: {}\n", report.deleted.len()));

    for failure in &report.failures {
        output.push_str(&format!(
            "  Could not delete {}: {}\n",
            failure.path.display(),
            failure.error
        ));
    }

    output
}

/// Format the totals of an executeall/cleanall sweep
pub fn format_sweep_summary(verb: &str, summary: &SweepSummary) -> String {
    let mut output = format!(
        "Finished {} {} schema(s): {} succeeded, {} failed.\n",
        verb,
        summary.total(),
        summary.succeeded,
        summary.failed.len()
    );

    if !summary.failed.is_empty() {
        output.push_str(&format!("  Failed: {}\n", summary.failed.join(", ")));
    }

    output
}

fn display_dir(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "(not set)".to_string()
    } else {
        path.display().to_string()
    }
}
