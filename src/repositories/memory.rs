//! In-memory repositories.
//!
//! Used by the service and router tests, and by `serve --in-memory` for
//! running the API without a database.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AppError, AppResult};
use crate::models::{Customer, CustomerInput, Game, NewGame, NewRental, Rental, RentalGame};
use crate::repositories::{CustomerRepository, GameRepository, RentalRepository};

/// Id-keyed table with a monotonically increasing sequence.
struct Table<T> {
    rows: DashMap<i32, T>,
    sequence: AtomicI32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicI32::new(0),
        }
    }

    fn next_id(&self) -> i32 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Stores a row under an explicit id and bumps the sequence past it.
    fn put(&self, id: i32, row: T) {
        self.sequence.fetch_max(id, Ordering::SeqCst);
        self.rows.insert(id, row);
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).map(|entry| entry.value().clone())
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    fn sorted(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(i32, T)> = self
            .rows
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }
}

#[derive(Clone)]
pub struct InMemoryCustomerRepository {
    table: Arc<Table<Customer>>,
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl InMemoryCustomerRepository {
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let repository = Self::default();
        for customer in customers {
            repository.insert(customer);
        }
        repository
    }

    /// Inserts a customer keeping its id.
    pub fn insert(&self, customer: Customer) {
        self.table.put(customer.id, customer);
    }

    fn cpf_taken(&self, cpf: &str, except_id: Option<i32>) -> bool {
        self.table
            .find(|c| c.cpf == cpf && Some(c.id) != except_id)
            .is_some()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        Ok(self.table.get(id))
    }

    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Customer>> {
        Ok(self.table.find(|c| c.cpf == cpf))
    }

    async fn list_all(&self) -> AppResult<Vec<Customer>> {
        Ok(self.table.sorted(|_| true))
    }

    async fn create(&self, input: CustomerInput) -> AppResult<Customer> {
        if self.cpf_taken(&input.cpf, None) {
            return Err(AppError::conflict("customer", "cpf", &input.cpf));
        }
        let customer = input.into_customer(self.table.next_id());
        self.table.put(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i32, input: CustomerInput) -> AppResult<Customer> {
        if self.table.get(id).is_none() {
            return Err(AppError::not_found("customer", "id", id));
        }
        if self.cpf_taken(&input.cpf, Some(id)) {
            return Err(AppError::conflict("customer", "cpf", &input.cpf));
        }
        let customer = input.into_customer(id);
        self.table.put(id, customer.clone());
        Ok(customer)
    }
}

#[derive(Clone)]
pub struct InMemoryGameRepository {
    table: Arc<Table<Game>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl InMemoryGameRepository {
    pub fn with_games(games: impl IntoIterator<Item = Game>) -> Self {
        let repository = Self::default();
        for game in games {
            repository.insert(game);
        }
        repository
    }

    /// Inserts a game keeping its id.
    pub fn insert(&self, game: Game) {
        self.table.put(game.id, game);
    }

    fn snapshot(&self, id: i32) -> AppResult<RentalGame> {
        self.table
            .get(id)
            .map(|game| RentalGame::from(&game))
            .ok_or_else(|| AppError::not_found("game", "id", id))
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Game>> {
        Ok(self.table.get(id))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Game>> {
        Ok(self.table.find(|g| g.name == name))
    }

    async fn list_all(&self) -> AppResult<Vec<Game>> {
        Ok(self.table.sorted(|_| true))
    }

    async fn create(&self, new_game: NewGame) -> AppResult<Game> {
        if self.table.find(|g| g.name == new_game.name).is_some() {
            return Err(AppError::conflict("game", "name", &new_game.name));
        }
        let game = new_game.into_game(self.table.next_id());
        self.table.put(game.id, game.clone());
        Ok(game)
    }
}

/// Rentals resolve their game snapshot through the shared game repository,
/// the way the database join does.
#[derive(Clone)]
pub struct InMemoryRentalRepository {
    table: Arc<Table<Rental>>,
    games: InMemoryGameRepository,
}

impl InMemoryRentalRepository {
    pub fn new(games: InMemoryGameRepository) -> Self {
        Self {
            table: Arc::new(Table::new()),
            games,
        }
    }

    /// Inserts a rental keeping its id.
    pub fn insert(&self, rental: Rental) {
        self.table.put(rental.id, rental);
    }

    /// Direct read used by tests to inspect stored state.
    pub fn get(&self, id: i32) -> Option<Rental> {
        self.table.get(id)
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rental>> {
        Ok(self.table.get(id))
    }

    async fn find_open_by_game(&self, game_id: i32) -> AppResult<Vec<Rental>> {
        Ok(self
            .table
            .sorted(|r| r.game_id == game_id && r.is_open()))
    }

    async fn list_all(&self) -> AppResult<Vec<Rental>> {
        Ok(self.table.sorted(|_| true))
    }

    async fn create(&self, rental: NewRental) -> AppResult<Rental> {
        let game = self.games.snapshot(rental.game_id)?;
        let rental = rental.into_rental(self.table.next_id(), game);
        self.table.put(rental.id, rental.clone());
        Ok(rental)
    }

    async fn update(&self, rental: &Rental) -> AppResult<Rental> {
        if self.table.get(rental.id).is_none() {
            return Err(AppError::not_found("rental", "id", rental.id));
        }
        self.table.put(rental.id, rental.clone());
        Ok(rental.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<usize> {
        Ok(self.table.rows.remove(&id).map_or(0, |_| 1))
    }
}
