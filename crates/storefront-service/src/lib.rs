//! # Storefront Service
//!
//! Read-through product caching and the product query service that
//! orchestrates persistence and cache.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::ProductServiceComponent;
