//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Environment;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::server::{Server, StorageBackend};

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
    storage: StorageBackend,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment, storage: StorageBackend) -> Self {
        Self {
            config,
            environment,
            storage,
        }
    }

    /// Run the server, or only validate the configuration when `dry_run` is set
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone())
            .with_environment(self.environment)
            .with_storage(self.storage)
            .run()
            .await
            .map_err(|source| AppError::Internal { source })
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        match self.storage {
            StorageBackend::Postgres => self.config.validate()?,
            StorageBackend::InMemory => self.config.validate_without_database()?,
        }

        println!("✓ Configuration is valid ({} environment)", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.storage {
            StorageBackend::Postgres => println!(
                "✓ Database: {} (auto_migrate = {})",
                self.config.database.redacted_url(),
                self.config.database.auto_migrate
            ),
            StorageBackend::InMemory => println!("✓ Storage: in-memory"),
        }
        println!("✓ Logger level: {}", self.config.logger.level);

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
