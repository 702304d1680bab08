//! Cache error type.

use std::time::Duration;
use storefront_core::StorefrontError;
use thiserror::Error;

/// Errors raised by cache stores and the product cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key is absent or has expired.
    #[error("Cache key not found")]
    NotFound,

    /// A stored value could not be encoded or decoded.
    #[error("Cache serialization error: {0}")]
    Serialization(String),

    /// The backing store could not be reached or rejected the command.
    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    /// The operation did not finish within its deadline.
    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

impl CacheError {
    /// Returns true for a plain miss.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<CacheError> for StorefrontError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Timeout(_) => StorefrontError::Timeout(err.to_string()),
            other => StorefrontError::Cache(other.to_string()),
        }
    }
}
