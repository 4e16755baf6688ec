//! Service layer for business logic operations.
//!
//! Services encapsulate the business rules and coordinate between
//! repositories and handlers.

mod customer_service;
mod game_service;
mod rental_service;

pub use customer_service::CustomerService;
pub use game_service::GameService;
pub use rental_service::RentalService;

use std::sync::Arc;

use crate::repositories::Repositories;
use crate::utils::Clock;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every service holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub games: GameService,
    pub rentals: RentalService,
}

impl Services {
    /// Creates the services over `repos`, dating rentals with `clock`.
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            customers: CustomerService::new(repos.customers.clone()),
            games: GameService::new(repos.games.clone()),
            rentals: RentalService::new(repos.rentals, repos.games, repos.customers, clock),
        }
    }
}
