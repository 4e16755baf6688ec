//! Customer request handlers.

use crate::api::doc::CUSTOMER_TAG;
use crate::api::dto::{CustomerRequest, CustomerResponse, ErrorResponse};
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

/// Creates customer routes.
///
/// Routes:
/// - GET /       - List all customers
/// - POST /      - Create a customer
/// - GET /{id}   - Get customer by ID
/// - PUT /{id}   - Replace customer by ID
pub fn customer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_customers, create_customer))
        .routes(routes!(get_customer, update_customer))
}

/// GET /api/customers - List all customers
#[utoipa::path(
    get,
    path = "/",
    tag = CUSTOMER_TAG,
    responses(
        (status = 200, description = "All customers", body = Vec<CustomerResponse>)
    )
)]
async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<CustomerResponse>>> {
    let customers = state.services.customers.list_customers().await?;
    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

/// GET /api/customers/{id} - Get customer by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CUSTOMER_TAG,
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state.services.customers.get_customer_by_id(id).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// POST /api/customers - Create a customer
#[utoipa::path(
    post,
    path = "/",
    tag = CUSTOMER_TAG,
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "CPF already registered", body = ErrorResponse)
    )
)]
async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CustomerRequest>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let customer = state
        .services
        .customers
        .create_customer(req.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// PUT /api/customers/{id} - Replace customer data
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CUSTOMER_TAG,
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 409, description = "CPF belongs to another customer", body = ErrorResponse)
    )
)]
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CustomerRequest>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state
        .services
        .customers
        .update_customer(id, req.into_input())
        .await?;
    Ok(Json(CustomerResponse::from(customer)))
}
