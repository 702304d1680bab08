//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use storefront_core::{
    CategoryId, ErrorResponse, FieldError, ProductId, ProductSortField, SortDirection,
};
use storefront_service::{
    CacheInvalidateResponse, CacheStatsResponse, CreateProductRequest, ProductListResponse,
    ProductResponse, UpdateProductRequest,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Storefront API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "Product catalog with a read-through Redis cache",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        crate::controllers::cache_controller::cache_stats,
        crate::controllers::cache_controller::invalidate_cache,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductId,
            CategoryId,
            ProductSortField,
            SortDirection,
            ErrorResponse,
            FieldError,
            ProductResponse,
            ProductListResponse,
            CreateProductRequest,
            UpdateProductRequest,
            CacheStatsResponse,
            CacheInvalidateResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "cache", description = "Product cache administration"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}
