//! Shared helpers for router tests.
//!
//! The router runs against the in-memory product repository and an
//! in-process cache store; no Postgres or Redis is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use storefront_config::{SecurityConfig, ServerConfig};
use storefront_core::{CategoryId, Product, ProductId, UserRole};
use storefront_repository::InMemoryProductRepository;
use storefront_rest::{create_router, AppState};
use storefront_security::TokenProvider;
use storefront_service::{
    CacheError, CacheStore, MemoryCacheStore, ProductCacheComponent, ProductServiceComponent,
};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryProductRepository>,
    pub store: Arc<MemoryCacheStore>,
    tokens: Arc<TokenProvider>,
}

impl TestApp {
    /// App backed by an in-process cache.
    pub fn new(products: Vec<Product>) -> Self {
        let store = Arc::new(MemoryCacheStore::new());
        Self::build(products, store.clone(), store)
    }

    /// App whose cache store fails every call.
    pub fn with_broken_cache(products: Vec<Product>) -> Self {
        Self::build(products, Arc::new(BrokenStore), Arc::new(MemoryCacheStore::new()))
    }

    fn build(
        products: Vec<Product>,
        cache_store: Arc<dyn CacheStore>,
        store: Arc<MemoryCacheStore>,
    ) -> Self {
        let repository = Arc::new(InMemoryProductRepository::with_products(products));
        let cache = Arc::new(ProductCacheComponent::new(
            cache_store,
            Duration::from_secs(300),
            Duration::from_millis(500),
        ));
        let service = Arc::new(ProductServiceComponent::new(repository.clone(), cache));

        let tokens = Arc::new(TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "router-test-secret".to_string(),
            ..SecurityConfig::default()
        })));

        let router = create_router(
            AppState::new(service),
            tokens.clone(),
            &ServerConfig::default(),
        );

        Self {
            router,
            repository,
            store,
            tokens,
        }
    }

    pub fn token(&self, role: UserRole) -> String {
        self.tokens
            .generate_access_token("1", "tester", role)
            .unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        role: Option<UserRole>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(role)));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, role: Option<UserRole>) -> Response<Body> {
        self.send(Method::GET, uri, role, None).await
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

pub fn product(id: i64, category: Option<i32>) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId(id),
        name: format!("Product {}", id),
        description: Some("Sturdy and useful".to_string()),
        price: 10.0 + id as f64,
        category_id: category.map(CategoryId),
        category_slug: None,
        stock: 5,
        image_url: None,
        sku: None,
        weight: None,
        dimensions: None,
        is_active: true,
        is_featured: false,
        sort_order: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn catalog(n: i64) -> Vec<Product> {
    (1..=n).map(|id| product(id, Some(if id % 2 == 0 { 2 } else { 1 }))).collect()
}

/// Cache store whose every call fails.
struct BrokenStore;

fn down<T>() -> Result<T, CacheError> {
    Err(CacheError::StoreUnavailable("connection refused".into()))
}

#[async_trait]
impl CacheStore for BrokenStore {
    async fn get_raw(&self, _key: &str) -> Result<String, CacheError> {
        down()
    }
    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        down()
    }
    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        down()
    }
    async fn delete_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        down()
    }
    async fn count_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        down()
    }
    fn is_enabled(&self) -> bool {
        true
    }
}
