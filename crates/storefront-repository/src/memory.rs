//! In-memory product repository for tests.

use crate::traits::ProductRepository;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use storefront_core::{
    NewProduct, Page, PageRequest, Product, ProductFilter, ProductId, ProductSortField,
    SortDirection, StorefrontError, StorefrontResult,
};

/// Product repository backed by a `BTreeMap`, ordered by id like the catalog.
///
/// Counts read calls so tests can assert that a cache hit never reached
/// persistence.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
    reads: AtomicUsize,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let repo = Self::new();
        let max_id = products.iter().map(|p| p.id.into_inner()).max().unwrap_or(0);
        repo.next_id.store(max_id, Ordering::SeqCst);
        {
            let mut map = repo.products.write();
            for product in products {
                map.insert(product.id, product);
            }
        }
        repo
    }

    /// Number of read operations served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn matching(&self, filter: &ProductFilter) -> Vec<Product> {
        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| p.is_active)
            .filter(|p| filter.category.matches(p.category_id))
            .filter(|p| {
                search.as_ref().map_or(true, |needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(needle))
                })
            })
            .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
            .cloned()
            .collect();

        products.sort_by(|a, b| {
            let ordering = match filter.sort {
                ProductSortField::Id => a.id.cmp(&b.id),
                ProductSortField::Name => a.name.cmp(&b.name),
                ProductSortField::Price => a.price.total_cmp(&b.price),
                ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            let ordering = match filter.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_active(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> StorefrontResult<Page<Product>> {
        self.record_read();
        Ok(Page::from_slice(&self.matching(filter), page))
    }

    async fn find_all_active(&self) -> StorefrontResult<Vec<Product>> {
        self.record_read();
        Ok(self.matching(&ProductFilter::default()))
    }

    async fn find_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
        self.record_read();
        Ok(self.products.read().get(&id).filter(|p| p.is_active).cloned())
    }

    async fn find_any_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
        self.record_read();
        Ok(self.products.read().get(&id).cloned())
    }

    async fn save(&self, product: &NewProduct) -> StorefrontResult<Product> {
        let id = ProductId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        let saved = Product {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category_id: product.category_id,
            category_slug: None,
            stock: product.stock,
            image_url: product.image_url.clone(),
            sku: product.sku.clone(),
            weight: product.weight,
            dimensions: product.dimensions.clone(),
            is_active: product.is_active,
            is_featured: product.is_featured,
            sort_order: product.sort_order,
            created_at: now,
            updated_at: now,
        };
        self.products.write().insert(id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, product: &Product) -> StorefrontResult<Product> {
        let mut products = self.products.write();
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product.clone())
            }
            None => Err(StorefrontError::not_found("Product", product.id)),
        }
    }

    async fn delete(&self, id: ProductId) -> StorefrontResult<bool> {
        Ok(self.products.write().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CategoryFilter, CategoryId};

    fn product(id: i64, name: &str, price: f64, category: Option<i32>, active: bool) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId(id),
            name: name.to_string(),
            description: None,
            price,
            category_id: category.map(CategoryId),
            category_slug: None,
            stock: 1,
            image_url: None,
            sku: None,
            weight: None,
            dimensions: None,
            is_active: active,
            is_featured: false,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn seeded() -> InMemoryProductRepository {
        InMemoryProductRepository::with_products(vec![
            product(1, "Lamp", 20.0, Some(1), true),
            product(2, "Chair", 50.0, Some(2), true),
            product(3, "Table", 80.0, Some(2), false),
            product(4, "Rug", 10.0, None, true),
        ])
    }

    #[tokio::test]
    async fn test_find_active_hides_inactive() {
        let repo = seeded();
        let page = repo
            .find_active(&ProductFilter::default(), PageRequest::first())
            .await
            .unwrap();
        let ids: Vec<i64> = page.content.iter().map(|p| p.id.into_inner()).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(page.total_elements(), 3);
    }

    #[tokio::test]
    async fn test_find_active_filters_and_sorts() {
        let repo = seeded();
        let filter = ProductFilter {
            sort: ProductSortField::Price,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let page = repo.find_active(&filter, PageRequest::first()).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Chair", "Lamp", "Rug"]);

        let filter = ProductFilter {
            category: CategoryFilter::Id(CategoryId(2)),
            ..Default::default()
        };
        let page = repo.find_active(&filter, PageRequest::first()).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_only_active() {
        let repo = seeded();
        assert!(repo.find_by_id(ProductId(3)).await.unwrap().is_none());
        assert!(repo.find_any_by_id(ProductId(3)).await.unwrap().is_some());
        assert_eq!(repo.read_count(), 2);
    }

    #[tokio::test]
    async fn test_save_assigns_next_id() {
        let repo = seeded();
        let saved = repo
            .save(&NewProduct {
                name: "Shelf".to_string(),
                description: None,
                price: 30.0,
                category_id: None,
                stock: 2,
                image_url: None,
                sku: None,
                weight: None,
                dimensions: None,
                is_active: true,
                is_featured: false,
                sort_order: 0,
            })
            .await
            .unwrap();
        assert_eq!(saved.id, ProductId(5));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = seeded();
        assert!(repo.delete(ProductId(1)).await.unwrap());
        assert!(!repo.delete(ProductId(1)).await.unwrap());
    }
}
