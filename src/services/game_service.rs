//! Game service for business logic operations.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Game, NewGame};
use crate::repositories::GameRepository;

#[derive(Clone)]
pub struct GameService {
    repo: Arc<dyn GameRepository>,
}

impl GameService {
    pub fn new(repo: Arc<dyn GameRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_game_by_id(&self, id: i32) -> AppResult<Option<Game>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_game_by_name(&self, name: &str) -> AppResult<Option<Game>> {
        self.repo.find_by_name(name).await
    }

    pub async fn list_games(&self) -> AppResult<Vec<Game>> {
        self.repo.list_all().await
    }

    /// Creates a game, rejecting a name that is already taken with `Conflict`.
    pub async fn create_game(&self, new_game: NewGame) -> AppResult<Game> {
        if self.get_game_by_name(&new_game.name).await?.is_some() {
            tracing::warn!(name = %new_game.name, "Game name already registered");
            return Err(AppError::conflict("game", "name", &new_game.name));
        }

        let game = self.repo.create(new_game).await?;
        tracing::info!(game_id = game.id, name = %game.name, "Game created");
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryGameRepository;
    use bigdecimal::BigDecimal;

    fn game(id: i32, name: &str) -> Game {
        Game {
            id,
            name: name.to_string(),
            image: format!("https://img.example/{name}.jpg"),
            price_per_day: BigDecimal::from(3),
            stock_total: 2,
        }
    }

    fn new_game(name: &str) -> NewGame {
        NewGame {
            name: name.to_string(),
            image: "https://img.example/new.jpg".to_string(),
            price_per_day: BigDecimal::from(5),
            stock_total: 4,
        }
    }

    fn service() -> GameService {
        let repo = InMemoryGameRepository::with_games([
            game(1, "chess"),
            game(2, "poker"),
            game(3, "uno"),
        ]);
        GameService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_game_with_existing_name_conflicts() {
        let result = service().create_game(new_game("poker")).await;
        match result {
            Err(AppError::Conflict { entity, field, value }) => {
                assert_eq!(entity, "game");
                assert_eq!(field, "name");
                assert_eq!(value, "poker");
            }
            other => panic!("Expected Conflict error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_game_persists_new_name() {
        let service = service();
        let created = service.create_game(new_game("catan")).await.unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(
            service.get_game_by_name("catan").await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn test_lookups_return_none_without_error() {
        let service = service();
        assert!(service.get_game_by_id(42).await.unwrap().is_none());
        assert!(service.get_game_by_name("go").await.unwrap().is_none());
        assert_eq!(service.list_games().await.unwrap().len(), 3);
    }
}
