//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `customer`, `game`, `rental` - resource request/response DTOs
//! - `error` - Common error response DTOs
//! - `health` - Health check DTOs

mod customer;
mod error;
mod game;
mod health;
mod rental;

pub use customer::{CustomerRequest, CustomerResponse};
pub use error::ErrorResponse;
pub use game::{CreateGameRequest, GameResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use rental::{CreateRentalRequest, RentalGameResponse, RentalResponse};
