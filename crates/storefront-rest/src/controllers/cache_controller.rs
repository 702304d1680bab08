//! Cache administration controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{invalidation_headers, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::HeaderMap, routing::{get, post}, Json, Router};
use storefront_security::ClaimsExt;
use storefront_service::{CacheInvalidateResponse, CacheStatsResponse};
use tracing::{info, warn};

/// Creates the cache router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(cache_stats))
        .route("/invalidate", post(invalidate_cache))
}

/// Key counts per cache pattern.
#[utoipa::path(
    get,
    path = "/cache/stats",
    tag = "cache",
    responses(
        (status = 200, description = "Key count per pattern, or \"error\" when a pattern could not be scanned", body = CacheStatsResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cache_stats(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<CacheStatsResponse> {
    let stats = state.product_service.cache_stats().await?;
    ok(CacheStatsResponse::from(stats))
}

/// Drop every cached product list (admin only).
///
/// A store failure is reported in the body with `X-Cache-Invalidation:
/// failed`; the stale entries still expire with their TTL.
#[utoipa::path(
    post,
    path = "/cache/invalidate",
    tag = "cache",
    responses(
        (status = 200, description = "Invalidation outcome", body = CacheInvalidateResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn invalidate_cache(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<(HeaderMap, Json<ApiResponse<CacheInvalidateResponse>>), AppError> {
    user.require_admin()?;

    let (invalidated, body) = match state.product_service.invalidate_cache().await {
        Ok(()) => {
            info!(subject = %user.sub, "Product cache invalidated");
            (true, CacheInvalidateResponse::succeeded())
        }
        Err(e) => {
            warn!("Manual cache invalidation failed: {}", e);
            (false, CacheInvalidateResponse::failed(e.to_string()))
        }
    };

    Ok((invalidation_headers(invalidated), Json(ApiResponse::success(body))))
}
