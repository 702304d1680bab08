//! Product service implementation.

use crate::cache::{CacheStats, ProductCache};
use crate::dto::{
    CreateProductRequest, ProductListQuery, ProductListResponse, ProductResponse,
    UpdateProductRequest,
};
use crate::product_service::{CacheStatus, Cached, Invalidated, ProductService};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use storefront_core::{NewProduct, ProductId, StorefrontError, StorefrontResult, ValidateExt};
use storefront_repository::ProductRepository;
use tracing::{debug, info, warn};

/// Product service component for Shaku DI.
///
/// Reads go through the product cache and fall back to the repository.
/// Writes hit the repository first; invalidation afterwards is best-effort
/// and its outcome is reported in [`Invalidated::cache_invalidated`].
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceComponent {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    product_cache: Arc<dyn ProductCache>,
}

impl ProductServiceComponent {
    /// Creates a product service outside the DI container.
    #[must_use]
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        product_cache: Arc<dyn ProductCache>,
    ) -> Self {
        Self {
            product_repository,
            product_cache,
        }
    }

    /// Reloads the full active catalog into the cache.
    async fn repopulate_catalog(&self) -> StorefrontResult<usize> {
        let catalog: Vec<ProductResponse> = self
            .product_repository
            .find_all_active()
            .await?
            .into_iter()
            .map(ProductResponse::from)
            .collect();

        self.product_cache.set_product_list(&catalog).await;
        Ok(catalog.len())
    }
}

impl std::fmt::Debug for ProductServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceComponent").finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductService for ProductServiceComponent {
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> StorefrontResult<Cached<ProductListResponse>> {
        debug!(
            "Listing products, page: {}, limit: {}",
            query.page.page, query.page.limit
        );

        let filter = query.filter();

        if !filter.is_catalog_view() {
            let page = self.product_repository.find_active(&filter, query.page).await?;
            return Ok(Cached::new(
                page.map(ProductResponse::from).into(),
                CacheStatus::Bypass,
            ));
        }

        if let Some(page) = self
            .product_cache
            .get_product_list(query.page, query.category_id.as_deref())
            .await
        {
            return Ok(Cached::new(page.into(), CacheStatus::Hit));
        }

        let page = self.product_repository.find_active(&filter, query.page).await?;

        if let Err(e) = self.repopulate_catalog().await {
            warn!(error = %e, "Failed to repopulate product catalog cache");
        }

        Ok(Cached::new(
            page.map(ProductResponse::from).into(),
            CacheStatus::Miss,
        ))
    }

    async fn get_product(&self, id: ProductId) -> StorefrontResult<Cached<ProductResponse>> {
        debug!("Getting product: {}", id);

        if let Some(product) = self.product_cache.get_product(id).await {
            return Ok(Cached::new(product, CacheStatus::Hit));
        }

        let product = self
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StorefrontError::not_found("Product", id))?;

        let response = ProductResponse::from(product);
        self.product_cache.set_product(&response).await;

        Ok(Cached::new(response, CacheStatus::Miss))
    }

    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> StorefrontResult<Invalidated<ProductResponse>> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let saved = self
            .product_repository
            .save(&NewProduct::from(request))
            .await?;

        let cache_invalidated = self.product_cache.invalidate_all().await.is_ok();

        info!(product_id = %saved.id, cache_invalidated, "Product created");
        Ok(Invalidated {
            value: ProductResponse::from(saved),
            cache_invalidated,
        })
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> StorefrontResult<Invalidated<ProductResponse>> {
        debug!("Updating product: {}", id);

        request.validate_request()?;

        let mut product = self
            .product_repository
            .find_any_by_id(id)
            .await?
            .ok_or_else(|| StorefrontError::not_found("Product", id))?;

        product.apply(request.into());

        let updated = self.product_repository.update(&product).await?;

        let cache_invalidated = self.product_cache.invalidate_product(id).await.is_ok();

        info!(product_id = %id, cache_invalidated, "Product updated");
        Ok(Invalidated {
            value: ProductResponse::from(updated),
            cache_invalidated,
        })
    }

    async fn delete_product(&self, id: ProductId) -> StorefrontResult<Invalidated<()>> {
        debug!("Deleting product: {}", id);

        if !self.product_repository.delete(id).await? {
            return Err(StorefrontError::not_found("Product", id));
        }

        let cache_invalidated = self.product_cache.invalidate_product(id).await.is_ok();

        info!(product_id = %id, cache_invalidated, "Product deleted");
        Ok(Invalidated {
            value: (),
            cache_invalidated,
        })
    }

    async fn cache_stats(&self) -> StorefrontResult<CacheStats> {
        Ok(self.product_cache.stats().await)
    }

    async fn invalidate_cache(&self) -> StorefrontResult<()> {
        self.product_cache
            .invalidate_all()
            .await
            .map_err(|e| StorefrontError::Cache(e.to_string()))?;

        info!("Product cache invalidated");
        Ok(())
    }

    async fn warm_cache(&self) -> StorefrontResult<usize> {
        let count = self.repopulate_catalog().await?;
        info!(products = count, "Product cache warmed");
        Ok(count)
    }
}
