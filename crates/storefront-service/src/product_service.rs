//! Product service trait definition.

use crate::cache::CacheStats;
use crate::dto::{
    CreateProductRequest, ProductListQuery, ProductListResponse, ProductResponse,
    UpdateProductRequest,
};
use async_trait::async_trait;
use storefront_core::{Interface, ProductId, StorefrontResult};

/// Where a read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the cache.
    Hit,
    /// Served from persistence after a cache miss.
    Miss,
    /// Served from persistence; the request shape is not cacheable.
    Bypass,
}

impl CacheStatus {
    /// Value for the `X-Cache` response header.
    #[must_use]
    pub const fn header_value(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss | Self::Bypass => "MISS",
        }
    }
}

/// A read result tagged with its cache status.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    pub value: T,
    pub status: CacheStatus,
}

impl<T> Cached<T> {
    #[must_use]
    pub const fn new(value: T, status: CacheStatus) -> Self {
        Self { value, status }
    }
}

/// A committed write, tagged with whether cache invalidation succeeded.
#[derive(Debug, Clone)]
pub struct Invalidated<T> {
    pub value: T,
    pub cache_invalidated: bool,
}

/// Product service trait.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Lists active products, from the cache when the listing allows it.
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> StorefrontResult<Cached<ProductListResponse>>;

    /// Gets an active product by ID.
    async fn get_product(&self, id: ProductId) -> StorefrontResult<Cached<ProductResponse>>;

    /// Creates a product and invalidates every list.
    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> StorefrontResult<Invalidated<ProductResponse>>;

    /// Updates a product and invalidates it and every list.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> StorefrontResult<Invalidated<ProductResponse>>;

    /// Deletes a product and invalidates it and every list.
    async fn delete_product(&self, id: ProductId) -> StorefrontResult<Invalidated<()>>;

    /// Returns cache statistics.
    async fn cache_stats(&self) -> StorefrontResult<CacheStats>;

    /// Drops every cached list.
    async fn invalidate_cache(&self) -> StorefrontResult<()>;

    /// Loads the active catalog into the cache. Returns the number of products.
    async fn warm_cache(&self) -> StorefrontResult<usize>;
}
