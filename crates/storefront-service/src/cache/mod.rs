//! Caching infrastructure for the service layer.
//!
//! [`CacheStore`] is the key-value capability (Redis or in-process).
//! [`ProductCache`] layers the product key schema, TTL policy and
//! failure handling on top of an injected store.

mod cache_store;
pub mod cache_keys;
mod error;
pub mod glob;
mod memory_cache;
mod product_cache;
mod redis_cache;

#[cfg(test)]
pub(crate) mod testing;

pub use cache_store::{CacheStore, CacheStoreExt};
pub use error::CacheError;
pub use memory_cache::MemoryCacheStore;
pub use product_cache::{
    CacheStats, PatternCount, ProductCache, ProductCacheComponent,
    ProductCacheComponentParameters, ProductPage, DEFAULT_OPERATION_TIMEOUT, DEFAULT_TTL,
};
pub use redis_cache::{RedisCacheStore, RedisCacheStoreParameters};
