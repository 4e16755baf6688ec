use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Deserialization failures become `BadRequest`, rule failures become
/// `ValidationErrors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct TestBody {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(range(min = 1, message = "daysRented must be at least 1"))]
        days_rented: i32,
    }

    fn json_request(body: &str, content_type: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(r#"{"name":"chess","daysRented":3}"#, "application/json");

        let ValidatedJson(body) = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(body.name, "chess");
        assert_eq!(body.days_rented, 3);
    }

    #[tokio::test]
    async fn test_rule_failures_are_collected_per_field() {
        let request = json_request(r#"{"name":"","daysRented":0}"#, "application/json");

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "days_rented");
                assert!(errors[0].message.contains("at least 1"));
                assert_eq!(errors[1].field, "name");
            }
            other => panic!("Expected ValidationErrors error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let request = json_request(r#"{"name":"chess"}"#, "application/json");

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();

        match error {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_bad_request() {
        let request = json_request(r#"{"name":"chess","daysRented":3}"#, "text/plain");

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::BadRequest { .. }));
    }
}
