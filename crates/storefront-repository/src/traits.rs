//! Repository trait definitions.

use async_trait::async_trait;
use storefront_core::{
    Interface, NewProduct, Page, PageRequest, Product, ProductFilter, ProductId, StorefrontResult,
};

/// Product repository trait.
///
/// Read operations only ever see active products.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Returns one page of active products matching `filter`, with the total
    /// number of matches.
    async fn find_active(&self, filter: &ProductFilter, page: PageRequest)
        -> StorefrontResult<Page<Product>>;

    /// Returns every active product in catalog order (`id ASC`).
    async fn find_all_active(&self) -> StorefrontResult<Vec<Product>>;

    /// Finds an active product by ID.
    async fn find_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>>;

    /// Finds a product by ID regardless of its active flag.
    async fn find_any_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>>;

    /// Inserts a new product.
    async fn save(&self, product: &NewProduct) -> StorefrontResult<Product>;

    /// Persists every mutable field of an existing product.
    async fn update(&self, product: &Product) -> StorefrontResult<Product>;

    /// Hard-deletes a product. Returns `false` when no row existed.
    async fn delete(&self, id: ProductId) -> StorefrontResult<bool>;
}
