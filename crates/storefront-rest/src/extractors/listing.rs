//! Product listing query extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core::{PageRequest, ProductSortField, SortDirection, StorefrontError};
use storefront_service::ProductListQuery;
use utoipa::IntoParams;

/// Query parameters of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size, clamped to 1..=100.
    pub limit: Option<u32>,
    /// Category id. A non-integer value yields an empty page.
    pub category_id: Option<String>,
    /// Case-insensitive match on name and description.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<ProductSortField>,
    pub order: Option<SortDirection>,
}

impl From<ProductListParams> for ProductListQuery {
    fn from(params: ProductListParams) -> Self {
        Self {
            page: PageRequest::new(
                params.page.unwrap_or(1),
                params.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
            ),
            category_id: params.category_id,
            search: params.search,
            min_price: params.min_price,
            max_price: params.max_price,
            sort: params.sort,
            order: params.order,
        }
    }
}

/// Query string extractor whose rejection uses the error envelope.
///
/// `?limit=abc` or `?sort=bogus` answer 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError(StorefrontError::validation(format!(
                    "Invalid query parameters: {}",
                    rejection.body_text()
                )))
            })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::Request, response::IntoResponse};
    use http_body_util::BodyExt;

    async fn extract(uri: &str) -> Result<ApiQuery<ProductListParams>, AppError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ApiQuery::<ProductListParams>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_query_is_parsed() {
        let ApiQuery(params) = extract("/products?page=2&limit=5&sort=price&order=desc")
            .await
            .unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.sort, Some(ProductSortField::Price));
        assert_eq!(params.order, Some(SortDirection::Desc));
    }

    #[tokio::test]
    async fn test_bad_query_uses_error_envelope() {
        for uri in ["/products?limit=abc", "/products?sort=bogus"] {
            let response = extract(uri).await.unwrap_err().into_response();
            assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], false);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[test]
    fn test_defaults() {
        let query = ProductListQuery::from(ProductListParams::default());
        assert_eq!(query.page, PageRequest::new(1, 10));
        assert!(query.is_cacheable());
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        let query = ProductListQuery::from(ProductListParams {
            page: Some(0),
            limit: Some(1000),
            ..Default::default()
        });
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.limit, PageRequest::MAX_LIMIT);
    }

    #[test]
    fn test_sort_changes_cacheability() {
        let query = ProductListQuery::from(ProductListParams {
            sort: Some(ProductSortField::Price),
            ..Default::default()
        });
        assert!(!query.is_cacheable());
    }
}
