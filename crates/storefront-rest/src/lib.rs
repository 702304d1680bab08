//! # Storefront REST
//!
//! REST API layer using Axum. Serves the product catalog with `X-Cache`
//! headers, cache administration endpoints and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
