use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use jiff::civil::Date;
use jiff_diesel::ToDiesel;

use crate::models::Game;

/// Lifecycle state of a rental.
///
/// `Open` rentals hold a unit of the game's stock. `Closed` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum RentalStatus {
    Open,
    Closed { return_date: Date, delay_fee: BigDecimal },
}

/// Snapshot of the rented game carried by every rental.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalGame {
    pub id: i32,
    pub name: String,
    pub price_per_day: BigDecimal,
}

impl From<&Game> for RentalGame {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            price_per_day: game.price_per_day.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: i32,
    pub customer_id: i32,
    pub game_id: i32,
    pub rent_date: Date,
    pub days_rented: i32,
    pub original_price: BigDecimal,
    pub status: RentalStatus,
    pub game: RentalGame,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        matches!(self.status, RentalStatus::Open)
    }

    pub fn return_date(&self) -> Option<Date> {
        match &self.status {
            RentalStatus::Open => None,
            RentalStatus::Closed { return_date, .. } => Some(*return_date),
        }
    }

    pub fn delay_fee(&self) -> Option<&BigDecimal> {
        match &self.status {
            RentalStatus::Open => None,
            RentalStatus::Closed { delay_fee, .. } => Some(delay_fee),
        }
    }

    /// Whole days past `rent_date + days_rented` as of `today`, never negative.
    pub fn days_overdue(&self, today: Date) -> i64 {
        let elapsed = i64::from((today - self.rent_date).get_days());
        (elapsed - i64::from(self.days_rented)).max(0)
    }

    /// Fee owed if the rental were returned on `today`.
    pub fn delay_fee_on(&self, today: Date) -> BigDecimal {
        let overdue = self.days_overdue(today);
        if overdue == 0 {
            return BigDecimal::zero();
        }
        BigDecimal::from(overdue) * &self.game.price_per_day
    }

    /// Moves the rental to `Closed`, charging the delay fee due on `return_date`.
    pub fn close(mut self, return_date: Date) -> Rental {
        let delay_fee = self.delay_fee_on(return_date);
        self.status = RentalStatus::Closed {
            return_date,
            delay_fee,
        };
        self
    }
}

/// Rental request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    pub customer_id: i32,
    pub game_id: i32,
    pub days_rented: i32,
}

/// Fully priced rental ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub customer_id: i32,
    pub game_id: i32,
    pub rent_date: Date,
    pub days_rented: i32,
    pub original_price: BigDecimal,
}

impl NewRental {
    pub fn into_rental(self, id: i32, game: RentalGame) -> Rental {
        Rental {
            id,
            customer_id: self.customer_id,
            game_id: self.game_id,
            rent_date: self.rent_date,
            days_rented: self.days_rented,
            original_price: self.original_price,
            status: RentalStatus::Open,
            game,
        }
    }
}

/// Row read from the rentals table
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RentalRecord {
    pub id: i32,
    pub customer_id: i32,
    pub game_id: i32,
    pub rent_date: jiff_diesel::Date,
    pub days_rented: i32,
    pub return_date: Option<jiff_diesel::Date>,
    pub original_price: BigDecimal,
    pub delay_fee: Option<BigDecimal>,
}

impl RentalRecord {
    /// Combines the row with its game snapshot into a domain rental.
    pub fn into_rental(self, game: RentalGame) -> Rental {
        let status = match self.return_date {
            None => RentalStatus::Open,
            Some(return_date) => RentalStatus::Closed {
                return_date: return_date.to_jiff(),
                delay_fee: self.delay_fee.unwrap_or_else(BigDecimal::zero),
            },
        };

        Rental {
            id: self.id,
            customer_id: self.customer_id,
            game_id: self.game_id,
            rent_date: self.rent_date.to_jiff(),
            days_rented: self.days_rented,
            original_price: self.original_price,
            status,
            game,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::rentals)]
pub struct NewRentalRecord {
    pub customer_id: i32,
    pub game_id: i32,
    pub rent_date: jiff_diesel::Date,
    pub days_rented: i32,
    pub original_price: BigDecimal,
}

impl From<NewRental> for NewRentalRecord {
    fn from(rental: NewRental) -> Self {
        Self {
            customer_id: rental.customer_id,
            game_id: rental.game_id,
            rent_date: rental.rent_date.to_diesel(),
            days_rented: rental.days_rented,
            original_price: rental.original_price,
        }
    }
}

/// Writes the lifecycle columns of a rental; `None` clears them.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::rentals)]
#[diesel(treat_none_as_null = true)]
pub struct RentalReturnChangeset {
    pub return_date: Option<jiff_diesel::Date>,
    pub delay_fee: Option<BigDecimal>,
}

impl From<&Rental> for RentalReturnChangeset {
    fn from(rental: &Rental) -> Self {
        match &rental.status {
            RentalStatus::Open => Self {
                return_date: None,
                delay_fee: None,
            },
            RentalStatus::Closed {
                return_date,
                delay_fee,
            } => Self {
                return_date: Some(return_date.to_diesel()),
                delay_fee: Some(delay_fee.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn open_rental(rent_date: Date, days_rented: i32, price: i32) -> Rental {
        Rental {
            id: 1,
            customer_id: 1,
            game_id: 1,
            rent_date,
            days_rented,
            original_price: BigDecimal::from(days_rented * price),
            status: RentalStatus::Open,
            game: RentalGame {
                id: 1,
                name: "chess".to_string(),
                price_per_day: BigDecimal::from(price),
            },
        }
    }

    #[test]
    fn test_days_overdue_zero_within_period() {
        let rental = open_rental(date(2024, 3, 1), 3, 2);
        assert_eq!(rental.days_overdue(date(2024, 3, 1)), 0);
        assert_eq!(rental.days_overdue(date(2024, 3, 4)), 0);
    }

    #[test]
    fn test_days_overdue_counts_whole_days_past_due() {
        let rental = open_rental(date(2024, 3, 1), 3, 2);
        assert_eq!(rental.days_overdue(date(2024, 3, 5)), 1);
        assert_eq!(rental.days_overdue(date(2024, 3, 11)), 7);
    }

    #[test]
    fn test_days_overdue_across_month_boundary() {
        let rental = open_rental(date(2024, 2, 27), 1, 1);
        // 2024 is a leap year: Feb 27 + 1 day due Feb 28, returned Mar 2
        assert_eq!(rental.days_overdue(date(2024, 3, 2)), 3);
    }

    #[test]
    fn test_delay_fee_on_time_is_zero() {
        let rental = open_rental(date(2024, 3, 1), 5, 3);
        assert_eq!(rental.delay_fee_on(date(2024, 3, 6)), BigDecimal::zero());
    }

    #[test]
    fn test_delay_fee_multiplies_price_per_day() {
        let mut rental = open_rental(date(2024, 3, 1), 2, 0);
        rental.game.price_per_day = "3.99".parse().unwrap();
        // due Mar 3, returned Mar 6 -> 3 days late
        assert_eq!(
            rental.delay_fee_on(date(2024, 3, 6)),
            "11.97".parse::<BigDecimal>().unwrap()
        );
    }

    #[test]
    fn test_close_transitions_to_closed_with_fee() {
        let rental = open_rental(date(2024, 3, 1), 1, 4);
        assert!(rental.is_open());
        assert!(rental.return_date().is_none());
        assert!(rental.delay_fee().is_none());

        let closed = rental.close(date(2024, 3, 4));

        assert!(!closed.is_open());
        assert_eq!(closed.return_date(), Some(date(2024, 3, 4)));
        assert_eq!(closed.delay_fee(), Some(&BigDecimal::from(8)));
    }

    #[test]
    fn test_return_changeset_for_open_rental_clears_columns() {
        let rental = open_rental(date(2024, 3, 1), 1, 4);
        let changeset = RentalReturnChangeset::from(&rental);
        assert!(changeset.return_date.is_none());
        assert!(changeset.delay_fee.is_none());
    }

    #[test]
    fn test_return_changeset_for_closed_rental() {
        let rental = open_rental(date(2024, 3, 1), 1, 4).close(date(2024, 3, 2));
        let changeset = RentalReturnChangeset::from(&rental);
        assert_eq!(changeset.return_date.map(|d| d.to_jiff()), Some(date(2024, 3, 2)));
        assert_eq!(changeset.delay_fee, Some(BigDecimal::zero()));
    }
}
