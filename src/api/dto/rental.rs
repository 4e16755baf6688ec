//! Rental DTOs.

use bigdecimal::BigDecimal;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Rental, RentalGame, RentalRequest};

/// Request body for opening a rental.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    #[validate(range(min = 1, message = "Customer id must be positive"))]
    #[schema(minimum = 1, example = 1)]
    pub customer_id: i32,
    #[validate(range(min = 1, message = "Game id must be positive"))]
    #[schema(minimum = 1, example = 1)]
    pub game_id: i32,
    #[validate(range(
        min = 1,
        max = 3650,
        message = "Days rented must be between 1 and 3650"
    ))]
    #[schema(minimum = 1, maximum = 3650, example = 3)]
    pub days_rented: i32,
}

impl CreateRentalRequest {
    pub fn into_rental_request(self) -> RentalRequest {
        RentalRequest {
            customer_id: self.customer_id,
            game_id: self.game_id,
            days_rented: self.days_rented,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalGameResponse {
    pub id: i32,
    pub name: String,
}

/// A rental; `returnDate` and `delayFee` are null while it is open.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    pub id: i32,
    pub customer_id: i32,
    pub game_id: i32,
    #[schema(value_type = String, format = Date)]
    pub rent_date: Date,
    pub days_rented: i32,
    #[schema(value_type = Option<String>, format = Date)]
    pub return_date: Option<Date>,
    #[schema(value_type = String)]
    pub original_price: BigDecimal,
    #[schema(value_type = Option<String>)]
    pub delay_fee: Option<BigDecimal>,
    pub game: RentalGameResponse,
}

impl From<RentalGame> for RentalGameResponse {
    fn from(game: RentalGame) -> Self {
        Self {
            id: game.id,
            name: game.name,
        }
    }
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        let return_date = rental.return_date();
        let delay_fee = rental.delay_fee().cloned();
        Self {
            id: rental.id,
            customer_id: rental.customer_id,
            game_id: rental.game_id,
            rent_date: rental.rent_date,
            days_rented: rental.days_rented,
            return_date,
            original_price: rental.original_price,
            delay_fee,
            game: RentalGameResponse::from(rental.game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RentalStatus;
    use jiff::civil::date;

    fn rental() -> Rental {
        Rental {
            id: 1,
            customer_id: 2,
            game_id: 3,
            rent_date: date(2024, 3, 1),
            days_rented: 3,
            original_price: BigDecimal::from(6),
            status: RentalStatus::Open,
            game: RentalGame {
                id: 3,
                name: "chess".to_string(),
                price_per_day: BigDecimal::from(2),
            },
        }
    }

    #[test]
    fn test_open_rental_serializes_nulls() {
        let json = serde_json::to_value(RentalResponse::from(rental())).unwrap();
        assert_eq!(json["rentDate"], "2024-03-01");
        assert!(json["returnDate"].is_null());
        assert!(json["delayFee"].is_null());
        assert_eq!(json["game"]["name"], "chess");
    }

    #[test]
    fn test_closed_rental_carries_return_data() {
        let response = RentalResponse::from(rental().close(date(2024, 3, 6)));
        assert_eq!(response.return_date, Some(date(2024, 3, 6)));
        assert_eq!(response.delay_fee, Some(BigDecimal::from(4)));
    }

    #[test]
    fn test_days_rented_must_be_positive() {
        let request = CreateRentalRequest {
            customer_id: 1,
            game_id: 1,
            days_rented: 0,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("days_rented"));
    }

    #[test]
    fn test_days_rented_upper_bound() {
        let request = |days_rented| CreateRentalRequest {
            customer_id: 1,
            game_id: 1,
            days_rented,
        };
        assert!(request(3650).validate().is_ok());

        let errors = request(3651).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("days_rented"));
    }

    #[test]
    fn test_longest_rental_at_highest_price_fits_price_column() {
        let max_price: BigDecimal = crate::api::dto::game::MAX_PRICE_PER_DAY.parse().unwrap();
        let original_price = BigDecimal::from(3650) * max_price;
        assert!(original_price < BigDecimal::from(100_000_000));
    }
}
