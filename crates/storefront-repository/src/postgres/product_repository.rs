//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use storefront_core::{
    CategoryFilter, CategoryId, NewProduct, Page, PageRequest, Product, ProductFilter, ProductId,
    ProductSortField, StorefrontError, StorefrontResult,
};
use tracing::debug;

/// Columns selected for a product row. `p` is the product relation and `c`
/// the joined category.
const PRODUCT_COLUMNS: &str = r#"
    p.id, p.name, p.description, p.price, p.category_id, c.slug AS category_slug,
    p.stock, p.image_url, p.sku, p.weight, p.dimensions,
    p.is_active, p.is_featured, p.sort_order, p.created_at, p.updated_at
"#;

/// PostgreSQL product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct PostgresProductRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn find_one(&self, id: ProductId, active_only: bool) -> StorefrontResult<Option<Product>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query
            .push(PRODUCT_COLUMNS)
            .push(" FROM products p LEFT JOIN categories c ON c.id = p.category_id WHERE p.id = ")
            .push_bind(id.into_inner());
        if active_only {
            query.push(" AND p.is_active = TRUE");
        }

        let row = query
            .build_query_as::<ProductRow>()
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Product::from))
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    category_id: Option<i32>,
    category_slug: Option<String>,
    stock: i32,
    image_url: Option<String>,
    sku: Option<String>,
    weight: Option<f64>,
    dimensions: Option<String>,
    is_active: bool,
    is_featured: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category_id: row.category_id.map(CategoryId),
            category_slug: row.category_slug,
            stock: row.stock,
            image_url: row.image_url,
            sku: row.sku,
            weight: row.weight,
            dimensions: row.dimensions,
            is_active: row.is_active,
            is_featured: row.is_featured,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Appends the `WHERE` clause for an active-product listing.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    query.push(" WHERE p.is_active = TRUE");

    if let CategoryFilter::Id(category) = filter.category {
        query.push(" AND p.category_id = ").push_bind(category.into_inner());
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        query
            .push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(min_price) = filter.min_price {
        query.push(" AND p.price >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        query.push(" AND p.price <= ").push_bind(max_price);
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_active(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> StorefrontResult<Page<Product>> {
        debug!(
            "Finding active products, page: {}, limit: {}, filter: {:?}",
            page.page, page.limit, filter
        );

        if filter.category == CategoryFilter::Unparseable {
            return Ok(Page::empty(page));
        }

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT ");
        select
            .push(PRODUCT_COLUMNS)
            .push(" FROM products p LEFT JOIN categories c ON c.id = p.category_id");
        push_filters(&mut select, filter);

        // Column and direction come from whitelisted enums, never from input.
        select
            .push(" ORDER BY ")
            .push(filter.sort.column())
            .push(" ")
            .push(filter.direction.as_sql());
        if filter.sort != ProductSortField::Id {
            select.push(", p.id ASC");
        }
        select
            .push(" LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = select
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let products = rows.into_iter().map(Product::from).collect();
        Ok(Page::new(products, page, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_all_active(&self) -> StorefrontResult<Vec<Product>> {
        debug!("Loading full active catalog");

        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query
            .push(PRODUCT_COLUMNS)
            .push(" FROM products p LEFT JOIN categories c ON c.id = p.category_id")
            .push(" WHERE p.is_active = TRUE ORDER BY p.id ASC");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
        debug!("Finding active product by id: {}", id);
        self.find_one(id, true).await
    }

    async fn find_any_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
        debug!("Finding product by id: {}", id);
        self.find_one(id, false).await
    }

    async fn save(&self, product: &NewProduct) -> StorefrontResult<Product> {
        debug!("Saving product: {}", product.name);

        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO products (
                    name, description, price, category_id, stock, image_url, sku,
                    weight, dimensions, is_active, is_featured, sort_order
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
            )
            SELECT {PRODUCT_COLUMNS}
            FROM p LEFT JOIN categories c ON c.id = p.category_id
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.category_id.map(CategoryId::into_inner))
            .bind(product.stock)
            .bind(&product.image_url)
            .bind(&product.sku)
            .bind(product.weight)
            .bind(&product.dimensions)
            .bind(product.is_active)
            .bind(product.is_featured)
            .bind(product.sort_order)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(Product::from(row))
    }

    async fn update(&self, product: &Product) -> StorefrontResult<Product> {
        debug!("Updating product: {}", product.id);

        let sql = format!(
            r#"
            WITH p AS (
                UPDATE products SET
                    name = $1, description = $2, price = $3, category_id = $4,
                    stock = $5, image_url = $6, sku = $7, weight = $8,
                    dimensions = $9, is_active = $10, is_featured = $11,
                    sort_order = $12, updated_at = $13
                WHERE id = $14
                RETURNING *
            )
            SELECT {PRODUCT_COLUMNS}
            FROM p LEFT JOIN categories c ON c.id = p.category_id
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.category_id.map(CategoryId::into_inner))
            .bind(product.stock)
            .bind(&product.image_url)
            .bind(&product.sku)
            .bind(product.weight)
            .bind(&product.dimensions)
            .bind(product.is_active)
            .bind(product.is_featured)
            .bind(product.sort_order)
            .bind(product.updated_at)
            .bind(product.id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Product::from)
            .ok_or_else(|| StorefrontError::not_found("Product", product.id))
    }

    async fn delete(&self, id: ProductId) -> StorefrontResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
