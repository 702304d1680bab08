//! In-process cache store.

use super::cache_store::ttl_seconds;
use super::glob::glob_match;
use super::{CacheError, CacheStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Cache store kept in process memory.
///
/// Used when Redis is disabled and in tests. Expired entries are invisible
/// and are dropped on the next access or pattern scan. The DI module installs
/// it with `with_component_override` in place of the Redis store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if there are no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops expired entries and returns the live keys matching `pattern`.
    fn live_keys(entries: &mut HashMap<String, Entry>, pattern: &str) -> Vec<String> {
        let now = Instant::now();
        entries.retain(|_, entry| entry.is_live(now));
        entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> Result<String, CacheError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Ok(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                Err(CacheError::NotFound)
            }
            None => Err(CacheError::NotFound),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let ttl_secs = ttl_seconds(ttl);
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.lock().insert(key.to_string(), entry);
        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let removed = self.entries.lock().remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(Instant::now())))
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut entries = self.entries.lock();
        let keys = Self::live_keys(&mut entries, pattern);
        for key in &keys {
            entries.remove(key);
        }
        debug!("Deleted {} keys matching pattern '{}'", keys.len(), pattern);
        Ok(keys.len() as u64)
    }

    async fn count_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut entries = self.entries.lock();
        Ok(Self::live_keys(&mut entries, pattern).len() as u64)
    }
}
