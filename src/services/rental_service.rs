//! Rental service: the rental lifecycle rules.
//!
//! A rental is created `Open` when the game and customer exist and the game
//! still has a free unit of stock. Returning closes it and charges the delay
//! fee; only closed rentals can be deleted. Every check runs before the
//! single repository write of each operation.

use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::error::{AppError, AppResult};
use crate::models::{NewRental, Rental, RentalRequest};
use crate::repositories::{CustomerRepository, GameRepository, RentalRepository};
use crate::utils::Clock;

#[derive(Clone)]
pub struct RentalService {
    rentals: Arc<dyn RentalRepository>,
    games: Arc<dyn GameRepository>,
    customers: Arc<dyn CustomerRepository>,
    clock: Arc<dyn Clock>,
}

impl RentalService {
    pub fn new(
        rentals: Arc<dyn RentalRepository>,
        games: Arc<dyn GameRepository>,
        customers: Arc<dyn CustomerRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rentals,
            games,
            customers,
            clock,
        }
    }

    /// Gets a rental by id.
    ///
    /// # Returns
    /// The rental if found, or `NotFound` error
    pub async fn get_rental_by_id(&self, id: i32) -> AppResult<Rental> {
        self.rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("rental", "id", id))
    }

    pub async fn list_rentals(&self) -> AppResult<Vec<Rental>> {
        self.rentals.list_all().await
    }

    /// Opens a rental dated today.
    ///
    /// Missing game or customer references are `BadRequest`, as is a game
    /// whose open rentals already use up its stock.
    pub async fn create_rental(&self, request: RentalRequest) -> AppResult<Rental> {
        let game = self
            .games
            .find_by_id(request.game_id)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(format!("Game {} does not exist", request.game_id))
            })?;

        if self.customers.find_by_id(request.customer_id).await?.is_none() {
            return Err(AppError::bad_request(format!(
                "Customer {} does not exist",
                request.customer_id
            )));
        }

        let open = self.rentals.find_open_by_game(game.id).await?;
        let available = i64::from(game.stock_total) - open.len() as i64;
        if available <= 0 {
            tracing::warn!(
                game_id = game.id,
                stock_total = game.stock_total,
                open_rentals = open.len(),
                "Rental rejected: no stock available"
            );
            return Err(AppError::bad_request(format!(
                "Game {} has no units available",
                game.id
            )));
        }

        let original_price = BigDecimal::from(request.days_rented) * &game.price_per_day;
        let rental = self
            .rentals
            .create(NewRental {
                customer_id: request.customer_id,
                game_id: game.id,
                rent_date: self.clock.today(),
                days_rented: request.days_rented,
                original_price,
            })
            .await?;

        tracing::info!(
            rental_id = rental.id,
            game_id = rental.game_id,
            customer_id = rental.customer_id,
            days_rented = rental.days_rented,
            "Rental created"
        );
        Ok(rental)
    }

    /// Closes an open rental today, charging any delay fee.
    pub async fn return_rental(&self, id: i32) -> AppResult<Rental> {
        let rental = self.get_rental_by_id(id).await?;
        if !rental.is_open() {
            return Err(AppError::bad_request(format!(
                "Rental {} has already been returned",
                id
            )));
        }

        let closed = rental.close(self.clock.today());
        let updated = self.rentals.update(&closed).await?;

        tracing::info!(
            rental_id = updated.id,
            delay_fee = ?updated.delay_fee(),
            "Rental returned"
        );
        Ok(updated)
    }

    /// Deletes a closed rental. Open rentals cannot be deleted.
    ///
    /// A rental removed by another request between the lookup and the
    /// delete is reported as `NotFound`.
    pub async fn delete_rental(&self, id: i32) -> AppResult<()> {
        let rental = self.get_rental_by_id(id).await?;
        if rental.is_open() {
            return Err(AppError::bad_request(format!(
                "Rental {} is still open",
                id
            )));
        }

        if self.rentals.delete(id).await? == 0 {
            return Err(AppError::not_found("rental", "id", id));
        }
        tracing::info!(rental_id = id, "Rental deleted");
        Ok(())
    }
}
