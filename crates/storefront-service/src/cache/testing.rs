//! Misbehaving cache stores for failure-path tests.

use super::{CacheError, CacheStore};
use async_trait::async_trait;
use std::time::Duration;

/// Store whose every operation fails with `StoreUnavailable`.
pub struct BrokenStore;

fn down<T>() -> Result<T, CacheError> {
    Err(CacheError::StoreUnavailable("connection refused".into()))
}

#[async_trait]
impl CacheStore for BrokenStore {
    async fn get_raw(&self, _key: &str) -> Result<String, CacheError> {
        down()
    }
    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        down()
    }
    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        down()
    }
    async fn delete_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        down()
    }
    async fn count_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        down()
    }
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Store that never answers.
pub struct HangingStore;

#[async_trait]
impl CacheStore for HangingStore {
    async fn get_raw(&self, _key: &str) -> Result<String, CacheError> {
        std::future::pending().await
    }
    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        std::future::pending().await
    }
    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        std::future::pending().await
    }
    async fn delete_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        std::future::pending().await
    }
    async fn count_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        std::future::pending().await
    }
    fn is_enabled(&self) -> bool {
        true
    }
}
