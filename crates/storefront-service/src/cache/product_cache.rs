//! Product cache on top of an injected [`CacheStore`].
//!
//! The whole active catalog lives under one key; list requests are answered
//! by filtering and slicing it, so pagination is always consistent with a
//! single snapshot. Single products have their own keys.
//!
//! Every store call runs under a deadline. Reads degrade to a miss on any
//! failure, writes are best-effort, and invalidation failures are reported
//! to the caller.

use super::{cache_keys, CacheError, CacheStore, CacheStoreExt};
use crate::dto::ProductResponse;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use shaku::{Component, Interface};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use storefront_core::{CategoryFilter, Page, PageRequest, ProductId};
use tracing::{debug, warn};

/// Default TTL for cached entries (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default deadline for a single store operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// A page of cached products with the filtered total.
pub type ProductPage = Page<ProductResponse>;

/// Key count for one stats pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCount {
    Count(u64),
    /// Enumeration failed.
    Error,
}

impl Serialize for PatternCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::Error => serializer.serialize_str("error"),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Key count per pattern.
    pub patterns: BTreeMap<String, PatternCount>,
    /// Number of products in the cached catalog, 0 when it is not cached.
    pub cached_products_count: usize,
}

/// Product-specific cache operations.
#[async_trait]
pub trait ProductCache: Interface + Send + Sync {
    /// Serves a page of the cached catalog, optionally restricted to one
    /// category. `None` is a miss.
    ///
    /// `category` is parsed as an integer; a value that does not parse gives
    /// an empty page, and products without a category never match a filter.
    async fn get_product_list(
        &self,
        page: PageRequest,
        category: Option<&str>,
    ) -> Option<ProductPage>;

    /// Stores the full active catalog.
    async fn set_product_list(&self, products: &[ProductResponse]);

    /// Gets a single product. `None` is a miss.
    async fn get_product(&self, id: ProductId) -> Option<ProductResponse>;

    /// Stores a single product.
    async fn set_product(&self, product: &ProductResponse);

    /// Removes a product and every list key.
    async fn invalidate_product(&self, id: ProductId) -> Result<(), CacheError>;

    /// Removes every list key. Single-product keys are kept.
    async fn invalidate_all(&self) -> Result<(), CacheError>;

    /// Reports key counts per pattern.
    async fn stats(&self) -> CacheStats;
}

/// Product cache component.
#[derive(Component)]
#[shaku(interface = ProductCache)]
pub struct ProductCacheComponent {
    #[shaku(inject)]
    store: Arc<dyn CacheStore>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
    #[shaku(default = DEFAULT_OPERATION_TIMEOUT)]
    operation_timeout: Duration,
}

impl ProductCacheComponent {
    /// Creates a product cache outside the DI container.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration, operation_timeout: Duration) -> Self {
        Self {
            store,
            ttl,
            operation_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, CacheError>> + Send,
    ) -> Result<T, CacheError> {
        tokio::time::timeout(self.operation_timeout, operation)
            .await
            .map_err(|_| CacheError::Timeout(self.operation_timeout))?
    }

    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.bounded(self.store.get::<T>(key)).await {
            Ok(value) => {
                debug!(key, "Cache hit");
                Some(value)
            }
            Err(e) if e.is_not_found() => {
                debug!(key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn write<T: Serialize + Send + Sync + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.bounded(self.store.set(key, value, self.ttl)).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }
}

#[async_trait]
impl ProductCache for ProductCacheComponent {
    async fn get_product_list(
        &self,
        page: PageRequest,
        category: Option<&str>,
    ) -> Option<ProductPage> {
        let catalog: Vec<ProductResponse> = self.read(cache_keys::ALL_PRODUCTS).await?;

        let filter = CategoryFilter::parse(category);
        let matching: Vec<ProductResponse> = catalog
            .into_iter()
            .filter(|p| filter.matches(p.category_id))
            .collect();

        Some(Page::from_slice(&matching, page))
    }

    async fn set_product_list(&self, products: &[ProductResponse]) {
        self.write(cache_keys::ALL_PRODUCTS, products).await;
    }

    async fn get_product(&self, id: ProductId) -> Option<ProductResponse> {
        self.read(&cache_keys::product(id)).await
    }

    async fn set_product(&self, product: &ProductResponse) {
        self.write(&cache_keys::product(product.id), product).await;
    }

    async fn invalidate_product(&self, id: ProductId) -> Result<(), CacheError> {
        let key = cache_keys::product(id);

        // The list delete runs even if the single delete failed.
        let single = self.bounded(self.store.delete(&key)).await;
        let lists = self
            .bounded(self.store.delete_pattern(cache_keys::LIST_PATTERN))
            .await;

        if let Err(e) = &single {
            warn!(key = %key, error = %e, "Failed to invalidate product");
        }
        if let Err(e) = &lists {
            warn!(pattern = cache_keys::LIST_PATTERN, error = %e, "Failed to invalidate product lists");
        }

        let existed = single?;
        let deleted = lists?;
        debug!(product_id = %id, existed, lists = deleted, "Invalidated product");
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), CacheError> {
        match self
            .bounded(self.store.delete_pattern(cache_keys::LIST_PATTERN))
            .await
        {
            Ok(deleted) => {
                debug!(lists = deleted, "Invalidated product lists");
                Ok(())
            }
            Err(e) => {
                warn!(pattern = cache_keys::LIST_PATTERN, error = %e, "Failed to invalidate product lists");
                Err(e)
            }
        }
    }

    async fn stats(&self) -> CacheStats {
        let mut patterns = BTreeMap::new();
        for pattern in cache_keys::STATS_PATTERNS {
            let count = match self.bounded(self.store.count_pattern(pattern)).await {
                Ok(n) => PatternCount::Count(n),
                Err(e) => {
                    warn!(pattern, error = %e, "Failed to count cache keys");
                    PatternCount::Error
                }
            };
            patterns.insert(pattern.to_string(), count);
        }

        let cached_products_count = self
            .read::<Vec<ProductResponse>>(cache_keys::ALL_PRODUCTS)
            .await
            .map_or(0, |catalog| catalog.len());

        CacheStats {
            patterns,
            cached_products_count,
        }
    }
}
