//! Game DTOs.

use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Game, NewGame};

/// Highest accepted daily price. Together with the rental length cap it keeps
/// rental prices within the `NUMERIC(10, 2)` price columns.
pub const MAX_PRICE_PER_DAY: &str = "9999.99";

static MAX_PRICE: LazyLock<BigDecimal> = LazyLock::new(|| {
    BigDecimal::from_str(MAX_PRICE_PER_DAY).expect("valid maximum daily price")
});

/// Request body for creating a game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(min_length = 1, example = "Banco Imobiliário")]
    pub name: String,
    #[validate(length(min = 1, message = "Image must not be empty"))]
    #[schema(example = "http://www.imagem.com.br/banco_imobiliario.jpg")]
    pub image: String,
    #[validate(range(min = 0, message = "Stock total must not be negative"))]
    #[schema(minimum = 0, example = 3)]
    pub stock_total: i32,
    #[schema(value_type = String, example = "15.00")]
    pub price_per_day: BigDecimal,
}

impl CreateGameRequest {
    /// Converts the request into a `NewGame`, rejecting prices outside
    /// `0..=MAX_PRICE_PER_DAY`.
    pub fn into_new_game(self) -> AppResult<NewGame> {
        if self.price_per_day < BigDecimal::zero() {
            return Err(AppError::Validation {
                field: "price_per_day".to_string(),
                reason: "Price per day must not be negative".to_string(),
            });
        }
        if self.price_per_day > *MAX_PRICE {
            return Err(AppError::Validation {
                field: "price_per_day".to_string(),
                reason: format!("Price per day must not exceed {}", MAX_PRICE_PER_DAY),
            });
        }
        Ok(NewGame {
            name: self.name,
            image: self.image,
            price_per_day: self.price_per_day,
            stock_total: self.stock_total,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub stock_total: i32,
    #[schema(value_type = String)]
    pub price_per_day: BigDecimal,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            name: game.name,
            image: game.image,
            stock_total: game.stock_total,
            price_per_day: game.price_per_day,
        }
    }
}
