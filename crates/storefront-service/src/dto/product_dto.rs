//! Product DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::rules::{not_blank, valid_sku};
use storefront_core::{
    CategoryFilter, CategoryId, NewProduct, Page, PageRequest, Product, ProductFilter, ProductId,
    ProductPatch, ProductSortField, SortDirection,
};
use utoipa::ToSchema;
use validator::Validate;

/// Product as returned by the API and as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<CategoryId>,
    pub category_slug: Option<String>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            category_slug: product.category_slug,
            stock: product.stock,
            image_url: product.image_url,
            sku: product.sku,
            weight: product.weight,
            dimensions: product.dimensions,
            is_active: product.is_active,
            is_featured: product.is_featured,
            sort_order: product.sort_order,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Request to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = not_blank, message = "Name must not be blank")
    )]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,

    pub category_id: Option<CategoryId>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[validate(custom(function = valid_sku, message = "Invalid SKU"))]
    pub sku: Option<String>,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,

    #[validate(length(max = 100))]
    pub dimensions: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub sort_order: i32,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            description: request.description,
            price: request.price,
            category_id: request.category_id,
            stock: request.stock,
            image_url: request.image_url,
            sku: request.sku,
            weight: request.weight,
            dimensions: request.dimensions,
            is_active: request.is_active,
            is_featured: request.is_featured,
            sort_order: request.sort_order,
        }
    }
}

/// Partial product update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = not_blank, message = "Name must not be blank")
    )]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: Option<f64>,

    pub category_id: Option<CategoryId>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[validate(custom(function = valid_sku, message = "Invalid SKU"))]
    pub sku: Option<String>,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,

    #[validate(length(max = 100))]
    pub dimensions: Option<String>,

    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name.map(|name| name.trim().to_string()),
            description: request.description,
            price: request.price,
            category_id: request.category_id,
            stock: request.stock,
            image_url: request.image_url,
            sku: request.sku,
            weight: request.weight,
            dimensions: request.dimensions,
            is_active: request.is_active,
            is_featured: request.is_featured,
            sort_order: request.sort_order,
        }
    }
}

/// Parameters of a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    pub page: PageRequest,
    /// Raw category filter; parsed leniently, see [`CategoryFilter::parse`].
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<ProductSortField>,
    pub order: Option<SortDirection>,
}

impl ProductListQuery {
    /// Builds the persistence filter.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: CategoryFilter::parse(self.category_id.as_deref()),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort.unwrap_or_default(),
            direction: self.order.unwrap_or_default(),
        }
    }

    /// Returns true when the cached catalog can answer this listing.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.filter().is_catalog_view()
    }
}

/// Paginated product list response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    /// Matching products across all pages.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl From<Page<ProductResponse>> for ProductListResponse {
    fn from(page: Page<ProductResponse>) -> Self {
        Self {
            total: page.info.total_elements,
            page: page.info.page,
            limit: page.info.limit,
            products: page.content,
        }
    }
}
