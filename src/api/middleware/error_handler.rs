//! Error handler for converting AppError to HTTP responses.
//!
//! Every error renders as an `ErrorResponse` JSON body. The body is also
//! stored in the response extensions so the request-id middleware can stamp
//! it with the request id.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. }
            | AppError::Validation { .. }
            | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::new(
                "NOT_FOUND",
                &format!("{} with {}={} not found", entity, field, value),
            )
            .with_details(json!({ "entity": entity, "field": field, "value": value })),
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Conflict {
                entity,
                field,
                value,
            } => ErrorResponse::new(
                "CONFLICT",
                &format!("{} with {}='{}' already exists", entity, field, value),
            )
            .with_details(json!({ "entity": entity, "field": field, "value": value })),
            AppError::Validation { field, reason } => {
                ErrorResponse::new("VALIDATION_ERROR", reason)
                    .with_details(json!({ "field": field }))
            }
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                    .with_details(json!({ "errors": errors }))
            }
            // Infrastructure failures never expose their source
            AppError::Database { operation, .. } => {
                ErrorResponse::new("DATABASE_ERROR", "Database operation failed")
                    .with_details(json!({ "operation": operation }))
            }
            AppError::Configuration { key, .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", "Configuration error")
                    .with_details(json!({ "key": key }))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = self.to_error_response();
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (AppError::not_found("rental", "id", 9), StatusCode::NOT_FOUND),
            (AppError::bad_request("no stock"), StatusCode::BAD_REQUEST),
            (AppError::conflict("customer", "cpf", "1"), StatusCode::CONFLICT),
            (
                AppError::Validation {
                    field: "cpf".to_string(),
                    reason: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::not_found("customer", "id", 42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorResponse>().is_some());

        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["details"]["value"], "42");
    }

    #[tokio::test]
    async fn test_validation_errors_body_lists_fields() {
        let response = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "cpf".to_string(),
                message: "CPF must have exactly 11 digits".to_string(),
            }],
        }
        .into_response();

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0]["field"], "cpf");
    }

    #[tokio::test]
    async fn test_internal_error_hides_source() {
        let response = AppError::Internal {
            source: anyhow::anyhow!("secret connection string"),
        }
        .into_response();

        let json = body_json(response).await;
        assert!(!json.to_string().contains("secret"));
    }
}
