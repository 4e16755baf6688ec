use bigdecimal::BigDecimal;
use diesel::prelude::*;

/// A board game available for rent.
///
/// `stock_total` counts every unit owned, rented out or not.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price_per_day: BigDecimal,
    pub stock_total: i32,
}

/// NewGame model for inserting new records
#[derive(Debug, Insertable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::games)]
pub struct NewGame {
    pub name: String,
    pub image: String,
    pub price_per_day: BigDecimal,
    pub stock_total: i32,
}

impl NewGame {
    pub fn into_game(self, id: i32) -> Game {
        Game {
            id,
            name: self.name,
            image: self.image,
            price_per_day: self.price_per_day,
            stock_total: self.stock_total,
        }
    }
}
