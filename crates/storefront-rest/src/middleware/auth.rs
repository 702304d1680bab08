//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use storefront_security::TokenProvider;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<TokenProvider>,
}

impl AuthMiddlewareState {
    #[must_use]
    pub fn new(token_provider: Arc<TokenProvider>) -> Self {
        Self { token_provider }
    }
}

/// Validates the bearer token, if any, and stores its claims in the request
/// extensions.
///
/// Requests without a valid token pass through untouched; handlers that need
/// a caller take [`crate::extractors::AuthenticatedUser`], which answers 401.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        match state.token_provider.validate_access_token(token) {
            Ok(claims) => {
                debug!(subject = %claims.sub, role = %claims.role, "Authenticated caller");
                request.extensions_mut().insert(claims);
            }
            Err(e) => debug!("Token validation failed: {}", e),
        }
    }

    next.run(request).await
}
