//! Product entity.

use crate::{CategoryId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as stored in the `products` table, joined with its
/// category slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// `None` for uncategorised products.
    pub category_id: Option<CategoryId>,
    pub category_slug: Option<String>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    /// Inactive products are hidden from listings and lookups.
    pub is_active: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Applies a partial update and bumps `updated_at`.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category_id) = patch.category_id {
            // The joined slug belongs to the old category; the repository
            // re-reads it on update.
            if self.category_id != Some(category_id) {
                self.category_slug = None;
            }
            self.category_id = Some(category_id);
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(sku) = patch.sku {
            self.sku = Some(sku);
        }
        if let Some(weight) = patch.weight {
            self.weight = Some(weight);
        }
        if let Some(dimensions) = patch.dimensions {
            self.dimensions = Some(dimensions);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        self.updated_at = Utc::now();
    }
}

/// Attributes of a product that does not exist yet. The database assigns
/// the id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<CategoryId>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub sort_order: i32,
}

/// Partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<CategoryId>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}
