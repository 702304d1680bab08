//! Key-value cache store abstraction.

use super::CacheError;
use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;

/// Key-value store with per-entry TTL and glob-pattern enumeration.
///
/// Values are JSON strings so the trait stays object-safe; use
/// [`CacheStoreExt`] for typed access.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Gets the raw value stored at `key`.
    ///
    /// Returns [`CacheError::NotFound`] when the key is absent or expired.
    async fn get_raw(&self, key: &str) -> Result<String, CacheError>;

    /// Stores `value` at `key`, replacing any prior value, expiring after `ttl`.
    ///
    /// TTLs below one second are rounded up to one second.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Deletes `key`. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Deletes every key matching the glob `pattern`.
    ///
    /// Enumeration and deletion are separate steps, so keys written in
    /// between may survive. Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError>;

    /// Counts keys matching the glob `pattern`.
    async fn count_pattern(&self, pattern: &str) -> Result<u64, CacheError>;

    /// Checks if the store is backed by anything.
    fn is_enabled(&self) -> bool;
}

/// Typed access on top of [`CacheStore`].
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Gets and decodes a value.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Result<T, CacheError> {
        let json = self.get_raw(key).await?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Encodes and stores a value.
    async fn set<T: serde::Serialize + Send + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheStore + ?Sized> CacheStoreExt for T {}

/// Whole seconds for a TTL, at least one.
pub(crate) fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}
