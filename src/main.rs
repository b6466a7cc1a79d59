use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use snapkeep::cli::{
    handle_clean, handle_clean_all, handle_config, handle_execute, handle_execute_all,
    handle_list, handle_template, join_name,
};
use snapkeep::config::{Settings, SnapkeepPaths};
use snapkeep::storage::SchemaRepository;

#[derive(Parser)]
#[command(
    name = "snapkeep",
    version,
    about = "Declarative snapshot backups driven by named schemas",
    long_about = "snapkeep copies the files and directories listed in a named schema \
                  into a fresh timestamped snapshot directory, and prunes old \
                  snapshots down to each schema's keep count."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all schemas
    List,

    /// Execute the given schema
    Execute {
        /// Schema name (case-insensitive, may contain spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Execute all schemas
    #[command(name = "executeall")]
    ExecuteAll,

    /// Create a schema template with the given name
    Template {
        /// Name for the new schema
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete all but the newest snapshots of the given schema
    Clean {
        /// Schema name (case-insensitive, may contain spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Clean all schemas
    #[command(name = "cleanall")]
    CleanAll,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            print_usage()?;
            return Ok(());
        }
    };

    let Some(command) = cli.command else {
        print_usage()?;
        return Ok(());
    };

    let paths = SnapkeepPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    snapkeep::logging::init(&settings, &paths)?;

    // Loaded once here and passed to every handler
    let mut repo = SchemaRepository::new(paths.schema_dir());
    let loaded = repo.load_all()?;
    log::info!("Loaded {} schemas.", loaded);
    log::info!("");

    match command {
        Commands::List => handle_list(&repo)?,
        Commands::Execute { name } => handle_execute(&repo, &join_name(&name))?,
        Commands::ExecuteAll => handle_execute_all(&repo)?,
        Commands::Template { name } => handle_template(&mut repo, &join_name(&name))?,
        Commands::Clean { name } => handle_clean(&repo, &join_name(&name))?,
        Commands::CleanAll => handle_clean_all(&repo)?,
        Commands::Config => handle_config(&paths, &settings)?,
    }

    log::logger().flush();
    Ok(())
}

fn print_usage() -> std::io::Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}
