//! Cache administration DTOs.

use crate::cache::{CacheStats, PatternCount};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Cache statistics response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CacheStatsResponse {
    /// Key count per pattern, or `"error"` when the pattern could not be scanned.
    #[schema(value_type = Object)]
    pub cache_stats: BTreeMap<String, PatternCount>,
    /// Products in the cached catalog.
    pub cached_products_count: usize,
    pub message: String,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            cache_stats: stats.patterns,
            cached_products_count: stats.cached_products_count,
            message: "Cache statistics retrieved".to_string(),
        }
    }
}

/// Result of a manual cache invalidation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CacheInvalidateResponse {
    pub invalidated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

impl CacheInvalidateResponse {
    #[must_use]
    pub fn succeeded() -> Self {
        Self {
            invalidated: true,
            error: None,
            message: "Product cache invalidated".to_string(),
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            invalidated: false,
            error: Some(error.into()),
            message: "Product cache invalidation failed; entries expire with their TTL".to_string(),
        }
    }
}
