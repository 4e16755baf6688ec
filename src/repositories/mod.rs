//! Repository layer for data access operations.
//!
//! Each entity has a repository trait consumed by the services, a
//! PostgreSQL implementation over diesel_async and an in-memory
//! implementation backed by `DashMap`.

mod customer_repo;
mod game_repo;
pub mod memory;
mod rental_repo;

pub use customer_repo::PgCustomerRepository;
pub use game_repo::PgGameRepository;
pub use memory::{InMemoryCustomerRepository, InMemoryGameRepository, InMemoryRentalRepository};
pub use rental_repo::PgRentalRepository;

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Customer, CustomerInput, Game, NewGame, NewRental, Rental};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>>;

    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Customer>>;

    async fn list_all(&self) -> AppResult<Vec<Customer>>;

    async fn create(&self, input: CustomerInput) -> AppResult<Customer>;

    /// Replaces every field of the customer with `id`.
    async fn update(&self, id: i32, input: CustomerInput) -> AppResult<Customer>;
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Game>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Game>>;

    async fn list_all(&self) -> AppResult<Vec<Game>>;

    async fn create(&self, game: NewGame) -> AppResult<Game>;
}

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rental>>;

    /// Rentals of `game_id` that have not been returned yet.
    async fn find_open_by_game(&self, game_id: i32) -> AppResult<Vec<Rental>>;

    async fn list_all(&self) -> AppResult<Vec<Rental>>;

    async fn create(&self, rental: NewRental) -> AppResult<Rental>;

    /// Persists the lifecycle state (return date and delay fee) of `rental`.
    async fn update(&self, rental: &Rental) -> AppResult<Rental>;

    /// Returns the number of deleted rows (0 or 1).
    async fn delete(&self, id: i32) -> AppResult<usize>;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub games: Arc<dyn GameRepository>,
    pub rentals: Arc<dyn RentalRepository>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            games: Arc::new(PgGameRepository::new(pool.clone())),
            rentals: Arc::new(PgRentalRepository::new(pool)),
        }
    }

    /// Creates empty in-memory repositories.
    pub fn in_memory() -> Self {
        let games = InMemoryGameRepository::default();
        Self {
            customers: Arc::new(InMemoryCustomerRepository::default()),
            rentals: Arc::new(InMemoryRentalRepository::new(games.clone())),
            games: Arc::new(games),
        }
    }
}
