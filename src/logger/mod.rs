//! Logger Module
//!
//! Logging built on `tracing-subscriber`:
//! - Console output, colored only on a terminal
//! - File output in Full, Compact or JSON format
//! - Level filter from `RUST_LOG` or the configured level

pub mod config;
pub mod error;

pub use config::*;
pub use error::LoggerError;

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber with the given configuration.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // The file layer goes first so console ANSI settings don't leak into
    // span fields written to the file (tokio-rs/tracing#1817).
    let file_layer = if config.file.enabled {
        let writer = Mutex::new(open_log_file(&config.file.path, config.file.append)?);
        let layer = match config.file.format {
            LogFormat::Full => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_ansi(false)
                .json()
                .with_writer(writer)
                .boxed(),
        };
        Some(layer)
    } else {
        None
    };

    let console_layer = config.console.enabled.then(|| {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(())
}

/// Opens the log file, creating its parent directories.
pub(crate) fn open_log_file(path: &Path, append: bool) -> Result<File, LoggerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");

        let file = open_log_file(&path, true);

        assert!(file.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_append_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "first\n").unwrap();

        let mut file = open_log_file(&path, true).unwrap();
        file.write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_truncate_discards_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "stale\n").unwrap();

        let mut file = open_log_file(&path, false).unwrap();
        file.write_all(b"fresh\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_init_logger_rejects_invalid_config() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert!(init_logger(config).is_err());
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_init_logger_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boardcamp.log");
        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            file: FileConfig {
                enabled: true,
                path: path.clone(),
                append: false,
                format: LogFormat::Json,
            },
            level: "info".to_string(),
        };

        init_logger(config).unwrap();
        tracing::warn!(rental_id = 7, "Rental overdue");

        let written = std::fs::read_to_string(&path).unwrap();
        let line = written.lines().last().unwrap();
        let json: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(json["fields"]["message"], "Rental overdue");
        assert_eq!(json["fields"]["rental_id"], 7);
    }
}
