//! Redis-based cache store.

use super::cache_store::ttl_seconds;
use super::{CacheError, CacheStore};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Connection, Pool};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Keys requested per `SCAN` round trip.
const SCAN_COUNT: usize = 200;

/// Keys deleted per `DEL` command.
const DELETE_BATCH: usize = 500;

/// Redis-based cache store.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    /// Redis connection pool. `None` disables the store.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheStore {
    /// Creates a store on top of a connection pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Creates a store that misses on every read and ignores writes.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    async fn get_conn(&self) -> Result<Connection, CacheError> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CacheError::StoreUnavailable(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CacheError::StoreUnavailable("Cache is disabled".to_string())),
        }
    }

    /// Collects every key matching `pattern` with an incremental `SCAN`.
    async fn scan_keys(conn: &mut Connection, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = deadpool_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut *conn)
                .await
                .map_err(|e| CacheError::StoreUnavailable(format!("Failed to scan keys: {}", e)))?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once.
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("enabled", &self.pool.is_some())
            .finish()
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> Result<String, CacheError> {
        if !self.is_enabled() {
            return Err(CacheError::NotFound);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        value.ok_or(CacheError::NotFound)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl_seconds(ttl);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| {
                CacheError::StoreUnavailable(format!("Failed to set key '{}': {}", key, e))
            })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let keys = Self::scan_keys(&mut conn, pattern).await?;

        let mut total: u64 = 0;
        for batch in keys.chunks(DELETE_BATCH) {
            let deleted: i64 = conn.del(batch.to_vec()).await.map_err(|e| {
                CacheError::StoreUnavailable(format!("Failed to delete keys: {}", e))
            })?;
            total += u64::try_from(deleted).unwrap_or(0);
        }

        debug!("Deleted {} keys matching pattern '{}'", total, pattern);
        Ok(total)
    }

    async fn count_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let keys = Self::scan_keys(&mut conn, pattern).await?;
        Ok(keys.len() as u64)
    }
}
