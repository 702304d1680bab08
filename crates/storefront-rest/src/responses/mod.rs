//! API response types.

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use storefront_core::{ErrorResponse, StorefrontError};
use storefront_service::CacheStatus;

/// Reports whether a read was served from the cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Set to `failed` when a write committed but its cache invalidation did not.
pub const X_CACHE_INVALIDATION: HeaderName = HeaderName::from_static("x-cache-invalidation");

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(error: ErrorResponse) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub StorefrontError);

impl From<StorefrontError> for AppError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::<()>::error(error_response));

        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `X-Cache` header for a read.
#[must_use]
pub fn cache_headers(status: CacheStatus) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_CACHE, HeaderValue::from_static(status.header_value()));
    headers
}

/// `X-Cache-Invalidation` header for a write, present only on failure.
#[must_use]
pub fn invalidation_headers(cache_invalidated: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if !cache_invalidated {
        headers.insert(X_CACHE_INVALIDATION, HeaderValue::from_static("failed"));
    }
    headers
}
