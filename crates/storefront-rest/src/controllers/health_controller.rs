//! Process probes for load balancers and orchestrators.
//!
//! None of these touch Postgres or the cache store.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

const SERVICE_NAME: &str = "storefront";

/// Body of every probe endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, `ready` or `alive` depending on the probe.
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    fn probe(status: &'static str) -> Json<Self> {
        Json(Self {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Overall service health.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    HealthResponse::probe("healthy")
}

/// Readiness probe. The router is only built once the pool and cache exist.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses((status = 200, description = "Accepting traffic", body = HealthResponse))
)]
pub async fn readiness_check() -> Json<HealthResponse> {
    HealthResponse::probe("ready")
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, description = "Event loop responsive", body = HealthResponse))
)]
pub async fn liveness_check() -> Json<HealthResponse> {
    HealthResponse::probe("alive")
}
