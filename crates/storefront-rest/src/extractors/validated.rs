//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and runs `validator` rules on it.
//! Malformed JSON and rule violations are both answered with 400 in the
//! standard error envelope; violations carry field-level details.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use storefront_core::{field_errors, ErrorResponse};
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let error_response = match self {
            Self::JsonError(rejection) => ErrorResponse {
                code: "INVALID_JSON".to_string(),
                message: format!("Invalid JSON: {}", rejection.body_text()),
                details: None,
            },
            Self::ValidationError(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(field_errors(&errors)),
            },
        };
        let body = Json(ApiResponse::<()>::error(error_response));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct RenameRequest {
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(request) =
            ValidatedJson::<RenameRequest>::from_request(json_request(r#"{"name":"lamp"}"#), &())
                .await
                .unwrap();
        assert_eq!(request.name, "lamp");
    }

    #[tokio::test]
    async fn test_rule_violation_is_rejected() {
        let rejection =
            ValidatedJson::<RenameRequest>::from_request(json_request(r#"{"name":"ab"}"#), &())
                .await
                .unwrap_err();
        match &rejection {
            ValidatedJsonRejection::ValidationError(errors) => {
                let fields = field_errors(errors);
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "name");
                assert_eq!(fields[0].message, "Name must be at least 3 characters");
            }
            other => panic!("unexpected rejection: {other:?}"),
        }
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let rejection =
            ValidatedJson::<RenameRequest>::from_request(json_request("{not json"), &())
                .await
                .unwrap_err();
        assert!(matches!(rejection, ValidatedJsonRejection::JsonError(_)));
    }
}
