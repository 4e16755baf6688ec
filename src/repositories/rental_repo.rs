//! Rental repository for async database operations.
//!
//! Rentals are always read joined with their game so the returned
//! `Rental` carries the game snapshot used for pricing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Game, NewRental, NewRentalRecord, Rental, RentalGame, RentalRecord, RentalReturnChangeset,
};
use crate::repositories::RentalRepository;
use crate::schema::{games, rentals};

#[derive(Clone)]
pub struct PgRentalRepository {
    pool: AsyncDbPool,
}

impl PgRentalRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn join_game((record, game): (RentalRecord, Game)) -> Rental {
    record.into_rental(RentalGame::from(&game))
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn find_by_id(&self, rental_id: i32) -> AppResult<Option<Rental>> {
        let mut conn = self.pool.get().await?;

        let row = rentals::table
            .inner_join(games::table)
            .filter(rentals::id.eq(rental_id))
            .select((RentalRecord::as_select(), Game::as_select()))
            .first::<(RentalRecord, Game)>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(row.map(join_game))
    }

    async fn find_open_by_game(&self, target_game_id: i32) -> AppResult<Vec<Rental>> {
        let mut conn = self.pool.get().await?;

        let rows = rentals::table
            .inner_join(games::table)
            .filter(rentals::game_id.eq(target_game_id))
            .filter(rentals::return_date.is_null())
            .select((RentalRecord::as_select(), Game::as_select()))
            .load::<(RentalRecord, Game)>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(join_game).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Rental>> {
        let mut conn = self.pool.get().await?;

        let rows = rentals::table
            .inner_join(games::table)
            .order(rentals::id.asc())
            .select((RentalRecord::as_select(), Game::as_select()))
            .load::<(RentalRecord, Game)>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(join_game).collect())
    }

    async fn create(&self, rental: NewRental) -> AppResult<Rental> {
        let mut conn = self.pool.get().await?;

        let record = diesel::insert_into(rentals::table)
            .values(NewRentalRecord::from(rental))
            .returning(RentalRecord::as_returning())
            .get_result::<RentalRecord>(&mut conn)
            .await
            .map_err(AppError::from)?;

        let game = games::table
            .filter(games::id.eq(record.game_id))
            .select(Game::as_select())
            .first::<Game>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(record.into_rental(RentalGame::from(&game)))
    }

    async fn update(&self, rental: &Rental) -> AppResult<Rental> {
        let mut conn = self.pool.get().await?;

        let record = diesel::update(rentals::table.filter(rentals::id.eq(rental.id)))
            .set(RentalReturnChangeset::from(rental))
            .returning(RentalRecord::as_returning())
            .get_result::<RentalRecord>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(record.into_rental(rental.game.clone()))
    }

    async fn delete(&self, rental_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(rentals::table.filter(rentals::id.eq(rental_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
