//! Server module for managing HTTP server lifecycle
//!
//! This module handles storage initialization, startup, and graceful shutdown.

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::Environment;
use crate::config::settings::Settings;
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

/// Where the server keeps its customers, games and rentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local storage; data is lost on shutdown
    InMemory,
}

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
    storage: StorageBackend,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            environment: Environment::from_env(),
            storage: StorageBackend::default(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    /// Start the server and run until a shutdown signal arrives
    ///
    /// # Errors
    /// - Migration or connection pool failures (PostgreSQL storage)
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment,
            storage = ?self.storage,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let state = self.build_state().await?;

        let router = create_router(
            state,
            Duration::from_secs(self.settings.server.request_timeout),
        );
        tracing::info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn build_state(&self) -> anyhow::Result<AppState> {
        match self.storage {
            StorageBackend::InMemory => {
                tracing::warn!("Using in-memory storage; data will not survive a restart");
                Ok(AppState::in_memory())
            }
            StorageBackend::Postgres => {
                let database = &self.settings.database;
                tracing::info!(
                    url = %database.redacted_url(),
                    max_connections = %database.max_connections,
                    min_connections = %database.min_connections,
                    connection_timeout = %database.connection_timeout,
                    auto_migrate = %database.auto_migrate,
                    "Database configuration loaded"
                );

                if database.auto_migrate {
                    let applied = run_pending_migrations(&database.url).await?;
                    tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                }

                let pool = establish_async_connection_pool(database).await?;
                tracing::info!("Database connection pool initialized");

                Ok(AppState::postgres(pool))
            }
        }
    }
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
