//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Environment as AppEnvironment;

/// Board-game rental service
#[derive(Parser, Debug)]
#[command(name = "boardcamp-rs")]
#[command(about = "Board-game rental service with a JSON HTTP API")]
#[command(long_about = "
Boardcamp-rs manages the customers, games and rentals of a board-game rental
store. It serves a JSON HTTP API backed by PostgreSQL (or by process memory
for quick trials) and ships its own database migrations.

EXAMPLES:
    # Start the server with default configuration
    boardcamp-rs serve

    # Start server on custom host and port
    boardcamp-rs serve --host 0.0.0.0 --port 8080

    # Try the API without a database
    boardcamp-rs serve --in-memory

    # Use custom configuration file
    boardcamp-rs --config /path/to/config.toml serve

    # Check configuration without starting server
    boardcamp-rs serve --dry-run

    # Run database migrations
    boardcamp-rs migrate

    # Rollback the last migration
    boardcamp-rs migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// Environment variable overrides still apply on top of it.
    ///
    /// Example: --config /etc/boardcamp-rs/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is loaded, taking precedence
    /// over BOARDCAMP_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level). Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   boardcamp-rs serve                           # Start with defaults
    ///   boardcamp-rs serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   boardcamp-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to (default: 127.0.0.1)
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (default: 4000)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; takes precedence over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,

        /// Keep all data in process memory instead of PostgreSQL
        ///
        /// The database section of the configuration is ignored and
        /// everything is lost when the server stops.
        #[arg(long)]
        in_memory: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   boardcamp-rs migrate                    # Apply all pending migrations
    ///   boardcamp-rs migrate --dry-run          # Show pending migrations without applying
    ///   boardcamp-rs migrate --rollback 1       # Rollback the last migration
    Migrate {
        /// Show pending migrations without applying. Cannot be used with --rollback.
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of most recent migrations to revert (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Test => AppEnvironment::Test,
            Environment::Staging => AppEnvironment::Staging,
            Environment::Production => AppEnvironment::Production,
        }
    }
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl Cli {
    /// Command to run, treating a bare invocation as `serve`.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: None,
            port: None,
            log_level: None,
            dry_run: false,
            in_memory: false,
        })
    }

    /// Whether the server will run without PostgreSQL.
    pub fn uses_in_memory_storage(&self) -> bool {
        matches!(
            self.command,
            Some(Commands::Serve {
                in_memory: true,
                ..
            })
        )
    }

    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        Ok(())
    }
}
