//! Product catalog controller.

use crate::{
    extractors::{ApiQuery, AuthenticatedUser, ProductListParams, ValidatedJson},
    responses::{cache_headers, created, invalidation_headers, no_content, ApiResponse, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use storefront_core::{ProductId, StorefrontError};
use storefront_security::ClaimsExt;
use storefront_service::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use tracing::debug;

type ProductBody = Json<ApiResponse<ProductResponse>>;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List active products.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ProductListParams),
    responses(
        (status = 200, description = "A page of active products; X-Cache tells HIT or MISS", body = ProductListResponse),
        (status = 400, description = "Malformed query parameters"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiQuery(params): ApiQuery<ProductListParams>,
) -> Result<(HeaderMap, Json<ApiResponse<ProductListResponse>>), AppError> {
    debug!(?params, "List products request");

    let result = state.product_service.list_products(params.into()).await?;
    Ok((
        cache_headers(result.status),
        Json(ApiResponse::success(result.value)),
    ))
}

/// Get an active product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product; X-Cache tells HIT or MISS", body = ProductResponse),
        (status = 400, description = "Invalid product ID"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<(HeaderMap, ProductBody), AppError> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let result = state.product_service.get_product(product_id).await?;
    Ok((
        cache_headers(result.status),
        Json(ApiResponse::success(result.value)),
    ))
}

/// Create a product (admin only).
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created; X-Cache-Invalidation: failed if the cache could not be cleared", body = ProductResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, HeaderMap, ProductBody), AppError> {
    debug!("Create product request: {}", request.name);

    user.require_admin()?;

    let result = state.product_service.create_product(request).await?;
    let (status, body) = created(result.value);
    Ok((status, invalidation_headers(result.cache_invalidated), body))
}

/// Update a product (admin only).
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated; X-Cache-Invalidation: failed if the cache could not be cleared", body = ProductResponse),
        (status = 400, description = "Invalid product ID or request body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> Result<(HeaderMap, ProductBody), AppError> {
    debug!("Update product request: {}", id);

    user.require_admin()?;

    let product_id = parse_product_id(&id)?;
    let result = state
        .product_service
        .update_product(product_id, request)
        .await?;
    Ok((
        invalidation_headers(result.cache_invalidated),
        Json(ApiResponse::success(result.value)),
    ))
}

/// Delete a product (admin only).
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted; X-Cache-Invalidation: failed if the cache could not be cleared"),
        (status = 400, description = "Invalid product ID"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    debug!("Delete product request: {}", id);

    user.require_admin()?;

    let product_id = parse_product_id(&id)?;
    let result = state.product_service.delete_product(product_id).await?;
    Ok((no_content(), invalidation_headers(result.cache_invalidated)))
}

/// Helper to parse a product ID from a path parameter.
fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id).map_err(|_| {
        AppError(StorefrontError::Validation(format!(
            "Invalid product ID: {}",
            id
        )))
    })
}
