//! Command executor for dispatching CLI commands
//!
//! Runs after argument parsing, configuration loading and logger setup.

use super::config_merger::ConfigurationMerger;
use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::server::StorageBackend;

/// Execute the parsed command with merged settings
///
/// A bare invocation runs `serve`.
///
/// # Errors
/// Returns argument validation errors or errors from the command handler
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    match cli.command_or_default() {
        Commands::Serve {
            dry_run, in_memory, ..
        } => {
            let storage = if in_memory {
                StorageBackend::InMemory
            } else {
                StorageBackend::Postgres
            };
            ServeCommandHandler::new(settings, ConfigurationMerger::environment_for(cli), storage)
                .execute(dry_run)
                .await
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
    }
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match cli.command {
        Some(Commands::Serve {
            ref host,
            port: Some(port),
            ..
        }) if port < 1024 => {
            tracing::warn!(
                host = host.as_deref().unwrap_or("configured host"),
                port,
                "Binding to a privileged port typically requires root privileges"
            );
        }
        Some(Commands::Migrate {
            rollback: Some(steps),
            ..
        }) if steps > 10 => {
            tracing::warn!(
                steps,
                "Rolling back many migrations at once; consider smaller steps"
            );
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["boardcamp-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, create_valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run_in_memory() {
        let cli =
            Cli::try_parse_from(["boardcamp-rs", "serve", "--dry-run", "--in-memory"]).unwrap();
        assert!(execute_command(&cli, Settings::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_migrate_zero_rollback_is_rejected() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(0),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        let result = execute_command(&cli, create_valid_config()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_validate_command_args_accepts_serve() {
        let cli = Cli::try_parse_from(["boardcamp-rs", "serve", "--port", "80"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[test]
    fn test_validate_conflicting_args() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        match validate_command_args(&cli) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
