mod customer;
mod game;
mod rental;

pub use customer::{Customer, CustomerChangeset, CustomerInput, CustomerRecord};
pub use game::{Game, NewGame};
pub use rental::{
    NewRental, NewRentalRecord, Rental, RentalGame, RentalRecord, RentalRequest,
    RentalReturnChangeset, RentalStatus,
};
