//! Configuration merger for CLI arguments and config files
//!
//! Command-line flags sit on top of the file and environment layers loaded by
//! `ConfigLoader`.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::settings::Settings;
use crate::config::{ConfigLoader, Environment};

/// Applies CLI overrides to file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration honouring `--config` and `--env`.
    ///
    /// # Errors
    /// Returns ConfigError if loading or deserialization fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = Self::loader_for(cli)?;
        Ok(Self::new(loader.load()?))
    }

    /// Environment the configuration was (or would be) loaded for.
    pub fn environment_for(cli: &Cli) -> Environment {
        cli.env.map(Environment::from).unwrap_or_else(Environment::from_env)
    }

    fn loader_for(cli: &Cli) -> Result<ConfigLoader, ConfigError> {
        let mut loader = ConfigLoader::new()?.with_environment(Self::environment_for(cli));
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }
        Ok(loader)
    }

    /// Merge CLI arguments with the base configuration and validate the result
    ///
    /// The database section is not validated when the server runs with
    /// in-memory storage.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        if cli.uses_in_memory_storage() {
            config.validate_without_database()?;
        } else {
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                ..
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                // Command-level log level beats --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Migrate { .. } => {}
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(create_valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = Settings::default();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_merge_verbose_and_quiet_flags() {
        assert_eq!(merge(&["boardcamp-rs", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["boardcamp-rs", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_serve_host_and_port() {
        let merged =
            merge(&["boardcamp-rs", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
        assert_eq!(merged.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["boardcamp-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_migrate_leaves_server_untouched() {
        let merged = merge(&["boardcamp-rs", "migrate"]).unwrap();
        assert_eq!(merged.server, create_valid_base_config().server);
    }

    #[test]
    fn test_merge_rejects_missing_database_url() {
        let cli = Cli::try_parse_from(["boardcamp-rs", "serve"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default());

        match merger.merge_cli_args(&cli) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "database.url"),
            other => panic!("Expected database.url ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_in_memory_serve_skips_database_validation() {
        let cli = Cli::try_parse_from(["boardcamp-rs", "serve", "--in-memory"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default());

        assert!(merger.merge_cli_args(&cli).is_ok());
    }

    #[test]
    fn test_environment_for_prefers_flag() {
        let cli = Cli::try_parse_from(["boardcamp-rs", "--env", "test"]).unwrap();
        assert_eq!(ConfigurationMerger::environment_for(&cli), Environment::Test);
    }
}
