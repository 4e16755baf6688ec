//! Rental request handlers.

use crate::api::doc::RENTAL_TAG;
use crate::api::dto::{CreateRentalRequest, ErrorResponse, RentalResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates rental routes.
///
/// Routes:
/// - GET /               - List all rentals
/// - POST /              - Open a rental
/// - GET /{id}           - Get rental by ID
/// - DELETE /{id}        - Delete a returned rental
/// - POST /{id}/return   - Return a rental
pub fn rental_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_rentals, create_rental))
        .routes(routes!(get_rental, delete_rental))
        .routes(routes!(return_rental))
}

/// GET /api/rentals - List all rentals
#[utoipa::path(
    get,
    path = "/",
    tag = RENTAL_TAG,
    responses(
        (status = 200, description = "All rentals", body = Vec<RentalResponse>)
    )
)]
async fn list_rentals(State(state): State<AppState>) -> AppResult<Json<Vec<RentalResponse>>> {
    let rentals = state.services.rentals.list_rentals().await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

/// GET /api/rentals/{id} - Get rental by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = RENTAL_TAG,
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental found", body = RentalResponse),
        (status = 404, description = "Rental not found", body = ErrorResponse)
    )
)]
async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalResponse>> {
    let rental = state.services.rentals.get_rental_by_id(id).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// POST /api/rentals - Open a rental dated today
#[utoipa::path(
    post,
    path = "/",
    tag = RENTAL_TAG,
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental created", body = RentalResponse),
        (status = 400, description = "Unknown game or customer, or no stock left", body = ErrorResponse)
    )
)]
async fn create_rental(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRentalRequest>,
) -> AppResult<(StatusCode, Json<RentalResponse>)> {
    let rental = state
        .services
        .rentals
        .create_rental(req.into_rental_request())
        .await?;
    Ok((StatusCode::CREATED, Json(RentalResponse::from(rental))))
}

/// POST /api/rentals/{id}/return - Return a rental
#[utoipa::path(
    post,
    path = "/{id}/return",
    tag = RENTAL_TAG,
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental returned, delay fee charged", body = RentalResponse),
        (status = 400, description = "Rental already returned", body = ErrorResponse),
        (status = 404, description = "Rental not found", body = ErrorResponse)
    )
)]
async fn return_rental(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalResponse>> {
    let rental = state.services.rentals.return_rental(id).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// DELETE /api/rentals/{id} - Delete a returned rental
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = RENTAL_TAG,
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 204, description = "Rental deleted"),
        (status = 400, description = "Rental is still open", body = ErrorResponse),
        (status = 404, description = "Rental not found", body = ErrorResponse)
    )
)]
async fn delete_rental(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.rentals.delete_rental(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
