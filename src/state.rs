//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::{Clock, SystemClock};

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Connection pool for health checks; `None` with in-memory storage
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>, db_pool: Option<AsyncDbPool>) -> Self {
        Self {
            services: Services::new(repos, clock),
            db_pool,
        }
    }

    /// State backed by PostgreSQL and the system clock.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self::new(
            Repositories::new(pool.clone()),
            Arc::new(SystemClock),
            Some(pool),
        )
    }

    /// State backed by empty in-memory repositories and the system clock.
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory(), Arc::new(SystemClock), None)
    }
}
