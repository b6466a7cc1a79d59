//! Schema CLI commands
//!
//! Implements the handlers behind `list`, `execute`, `executeall`,
//! `template`, `clean`, `cleanall` and `config`.

use crate::backup::{self, list_snapshots};
use crate::config::{Settings, SnapkeepPaths};
use crate::display::{
    format_clean_report, format_execution_report, format_schema_list, format_sweep_summary,
    SchemaListing,
};
use crate::error::SnapkeepResult;
use crate::models::Schema;
use crate::storage::SchemaRepository;

/// Join the words of a multi-word schema name
pub fn join_name(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

/// `list`: show every loaded schema
pub fn handle_list(repo: &SchemaRepository) -> SnapkeepResult<()> {
    let listings: Vec<SchemaListing> = repo
        .all()
        .iter()
        .map(|schema| SchemaListing {
            schema,
            snapshot_count: snapshot_count(schema),
        })
        .collect();

    print!("{}", format_schema_list(&listings));
    Ok(())
}

/// `execute <name>`: back up one schema
pub fn handle_execute(repo: &SchemaRepository, name: &str) -> SnapkeepResult<()> {
    let Some(schema) = find_or_report(repo, name)? else {
        return Ok(());
    };

    log::info!("Executing schema {}...", schema.name);
    match backup::execute_schema(schema) {
        Ok(report) => print!("{}", format_execution_report(&report)),
        Err(e) => log::error!("Schema '{}' was not backed up: {}", schema.name, e),
    }
    Ok(())
}

/// `executeall`: back up every schema, continuing past failures
pub fn handle_execute_all(repo: &SchemaRepository) -> SnapkeepResult<()> {
    log::info!("Executing all ({}) schemas...", repo.len());
    log::info!("");

    let summary = backup::execute_all(repo.all());
    print!("{}", format_sweep_summary("executing", &summary));
    Ok(())
}

/// `template <name>`: write a blank schema file
pub fn handle_template(repo: &mut SchemaRepository, name: &str) -> SnapkeepResult<()> {
    let schema = repo.create_template(name)?;

    println!("Generated a new schema with the name: {}", schema.name);
    println!("Location: {}", repo.file_for(&schema.name).display());
    println!();
    println!("Fill in \"Base Directory\", \"Backup Directory\" and \"Files\", then run:");
    println!("  snapkeep execute {}", schema.name);
    Ok(())
}

/// `clean <name>`: prune one schema's old snapshots
pub fn handle_clean(repo: &SchemaRepository, name: &str) -> SnapkeepResult<()> {
    let Some(schema) = find_or_report(repo, name)? else {
        return Ok(());
    };

    log::info!("Cleaning schema {}...", schema.name);
    match backup::clean_schema(schema) {
        Ok(report) => print!("{}", format_clean_report(&report)),
        Err(e) => log::error!("Schema '{}' was not cleaned: {}", schema.name, e),
    }
    Ok(())
}

/// `cleanall`: prune every schema, continuing past failures
pub fn handle_clean_all(repo: &SchemaRepository) -> SnapkeepResult<()> {
    log::info!("Cleaning all ({}) schemas...", repo.len());
    log::info!("");

    let summary = backup::clean_all(repo.all());
    print!("{}", format_sweep_summary("cleaning", &summary));
    Ok(())
}

/// `config`: show resolved paths and settings
pub fn handle_config(paths: &SnapkeepPaths, settings: &Settings) -> SnapkeepResult<()> {
    println!("snapkeep Configuration");
    println!("======================");
    println!("Home directory:   {}", paths.base_dir().display());
    println!("Schema directory: {}", paths.schema_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  Log level:   {}", settings.effective_log_level());
    println!(
        "  Log to file: {}",
        if settings.log_to_file { "Yes" } else { "No" }
    );
    Ok(())
}

fn find_or_report<'a>(
    repo: &'a SchemaRepository,
    name: &str,
) -> SnapkeepResult<Option<&'a Schema>> {
    match repo.get(name) {
        Ok(schema) => Ok(Some(schema)),
        Err(e) if e.is_not_found() => {
            println!("A schema was not found with the name '{}'.", name);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn snapshot_count(schema: &Schema) -> Option<usize> {
    if !schema.backup_directory.is_dir() {
        return None;
    }
    list_snapshots(&schema.backup_directory)
        .ok()
        .map(|snapshots| snapshots.len())
}
