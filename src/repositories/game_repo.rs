//! Game repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Game, NewGame};
use crate::repositories::GameRepository;
use crate::schema::games;

#[derive(Clone)]
pub struct PgGameRepository {
    pool: AsyncDbPool,
}

impl PgGameRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn find_by_id(&self, game_id: i32) -> AppResult<Option<Game>> {
        let mut conn = self.pool.get().await?;

        games::table
            .filter(games::id.eq(game_id))
            .select(Game::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_name(&self, game_name: &str) -> AppResult<Option<Game>> {
        let mut conn = self.pool.get().await?;

        games::table
            .filter(games::name.eq(game_name))
            .select(Game::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> AppResult<Vec<Game>> {
        let mut conn = self.pool.get().await?;

        games::table
            .order(games::id.asc())
            .select(Game::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, new_game: NewGame) -> AppResult<Game> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(games::table)
            .values(&new_game)
            .returning(Game::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
