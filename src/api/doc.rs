use utoipa::OpenApi;

pub const CUSTOMER_TAG: &str = "Customers";
pub const GAME_TAG: &str = "Games";
pub const RENTAL_TAG: &str = "Rentals";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boardcamp",
        description = "Board game rental API: customers, games and rentals",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::HealthStatus,
            crate::api::dto::ComponentHealth,
        )
    ),
    tags(
        (name = CUSTOMER_TAG, description = "Customer registration endpoints"),
        (name = GAME_TAG, description = "Game catalog endpoints"),
        (name = RENTAL_TAG, description = "Rental lifecycle endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
