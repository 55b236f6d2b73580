//! CLI argument definitions for `GpaCalculator`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_calculator::config::ConfigOverrides;
use gpa_calculator::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to
/// lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CatalogSubcommand {
    /// List every course in the catalog.
    List,
    /// Search the catalog by code, name, degree, university, or country.
    Search {
        /// Search term (case-insensitive substring match)
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Add or update a course, keyed by its code.
    ///
    /// All six fields are required; incomplete records are rejected whole.
    Add {
        /// Course code (e.g., CM1111)
        #[arg(value_name = "CODE")]
        code: String,
        /// Full course name
        #[arg(value_name = "NAME")]
        name: String,
        /// Credit weight (positive, can be fractional)
        #[arg(value_name = "CREDITS")]
        credits: f64,
        /// Degree programme
        #[arg(long, value_name = "DEGREE")]
        degree: String,
        /// Institution name
        #[arg(long, value_name = "UNIVERSITY")]
        university: String,
        /// Country of the institution
        #[arg(long, value_name = "COUNTRY")]
        country: String,
    },
    /// Delete a course by code (deleting an absent code succeeds).
    Delete {
        /// Course code to delete
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Export the catalog (courses + templates) as JSON.
    Export {
        /// Output file path (optional; defaults to a timestamped file in config `exports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import a catalog JSON blob, replacing each list it contains.
    Import {
        /// Path to a previously exported JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage the durable course catalog.
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },
    /// Print per-semester and overall GPA for a saved semester plan.
    ///
    /// The plan file is a JSON array of semesters, each with a name and a
    /// list of courses (code, title, credit, grade).
    Report {
        /// Path to a semester plan JSON file
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Open an interactive semester editor on stdin.
    ///
    /// Supports adding and removing courses, grade changes, semester resets,
    /// and undo. Type `help` inside the session for the command list.
    Session {
        /// Optional plan JSON file to load into the editor at startup
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gpacalc",
    about = "GpaCalculator command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config catalog data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config catalog data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config exports output directory
    #[arg(long = "config-exports-dir", value_name = "DIR")]
    pub config_exports_dir: Option<PathBuf>,

    /// Override config exports output directory (short form)
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be
    /// applied to the loaded configuration. Short-form flags (e.g.,
    /// `--data-dir`) take precedence over long-form flags (e.g.,
    /// `--config-data-dir`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_data_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
            exports_dir: self
                .exports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_exports_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}
