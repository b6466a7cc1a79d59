//! Console and file logging
//!
//! Implements a `log` backend. Info and debug records go to stdout as plain
//! lines; warnings and errors go to stderr prefixed with `[X] ` and coloured
//! red on a terminal. When a log file is configured, every record is also
//! appended to it with a UTC timestamp.

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use crossterm::style::Stylize;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::{Settings, SnapkeepPaths};
use crate::error::{SnapkeepError, SnapkeepResult};

/// `log` backend writing to the console and, optionally, a log file
pub struct ConsoleLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    log_path: Option<PathBuf>,
}

impl ConsoleLogger {
    /// Create a logger; the log file is opened in append mode if given
    ///
    /// A log file that cannot be opened is reported once on stderr and
    /// otherwise ignored.
    pub fn new(level: LevelFilter, log_path: Option<PathBuf>) -> Self {
        let file = log_path.as_deref().and_then(|path| match open_append(path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(e) => {
                eprintln!("Could not open log file {}: {}", path.display(), e);
                None
            }
        });

        Self {
            level,
            file,
            log_path,
        }
    }

    /// Path of the log file, if one is configured
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    fn write_console(&self, record: &Record) {
        let message = record.args().to_string();
        match record.level() {
            Level::Error | Level::Warn => {
                let line = format!("[X] {}", message);
                let mut stderr = io::stderr();
                if stderr.is_terminal() {
                    let _ = writeln!(stderr, "{}", line.red());
                } else {
                    let _ = writeln!(stderr, "{}", line);
                }
            }
            _ => {
                let _ = writeln!(io::stdout(), "{}", message);
            }
        }
    }

    fn write_file(&self, record: &Record) {
        let Some(file) = &self.file else {
            return;
        };

        // Blank console spacer lines carry nothing worth keeping
        let message = record.args().to_string();
        if message.is_empty() {
            return;
        }

        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "{}", format_file_line(record.level(), &message));
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.write_console(record);
        self.write_file(record);
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// One log file line: `<RFC3339 UTC> <LEVEL> <message>`
fn format_file_line(level: Level, message: &str) -> String {
    format!(
        "{} {:<5} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        level,
        message
    )
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the logger as the global `log` backend
pub fn init(settings: &Settings, paths: &SnapkeepPaths) -> SnapkeepResult<()> {
    let level = settings.effective_log_level();
    let log_path = settings.log_to_file.then(|| paths.log_file());

    log::set_boxed_logger(Box::new(ConsoleLogger::new(level, log_path)))
        .map_err(|e| SnapkeepError::Config(format!("Failed to install logger: {}", e)))?;
    log::set_max_level(level);

    Ok(())
}
