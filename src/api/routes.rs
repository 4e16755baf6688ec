//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Builds the documented router and returns it with its OpenAPI document.
pub fn api_router(state: AppState) -> (Router, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .nest("/api/customers", handlers::customers::customer_routes())
        .nest("/api/games", handlers::games::game_routes())
        .nest("/api/rentals", handlers::rentals::rental_routes())
        .with_state(state)
        .split_for_parts()
}

/// Answers `408 Request Timeout` once a handler runs past `timeout`.
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware (runs first) - generates/propagates request IDs
/// 2. Logging middleware (runs second) - logs requests with request IDs
/// 3. Request timeout (innermost) - so timed out requests are still logged
///
/// # Routes
/// - `/api/customers`, `/api/games`, `/api/rentals` - resource endpoints
/// - `/health`, `/health/ready`, `/health/live` - probes
/// - `/swagger-ui` - API documentation, spec at `/api-docs/openapi.json`
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, openapi) = api_router(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(request_timeout_layer(request_timeout))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
