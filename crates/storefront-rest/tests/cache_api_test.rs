mod common;

use axum::http::{Method, StatusCode};
use common::{catalog, header, json_body, TestApp};
use storefront_core::UserRole;

#[tokio::test]
async fn test_stats_count_cached_keys() {
    let app = TestApp::new(catalog(4));
    app.get("/api/v1/products", Some(UserRole::User)).await;
    app.get("/api/v1/products/1", Some(UserRole::User)).await;

    let response = app.get("/api/v1/cache/stats", Some(UserRole::User)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let stats = &body["data"]["cache_stats"];
    assert_eq!(stats["products:all"], 1);
    assert_eq!(stats["product:*"], 1);
    assert_eq!(stats["products:category:*"], 0);
    assert_eq!(body["data"]["cached_products_count"], 4);
}

#[tokio::test]
async fn test_stats_report_errors_per_pattern() {
    let app = TestApp::with_broken_cache(catalog(1));

    let response = app.get("/api/v1/cache/stats", Some(UserRole::User)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["cache_stats"]["products:all"], "error");
    assert_eq!(body["data"]["cached_products_count"], 0);
}

#[tokio::test]
async fn test_invalidate_requires_admin() {
    let app = TestApp::new(catalog(1));
    let response = app
        .send(Method::POST, "/api/v1/cache/invalidate", Some(UserRole::User), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalidate_drops_lists() {
    let app = TestApp::new(catalog(2));
    app.get("/api/v1/products", Some(UserRole::User)).await;

    let response = app
        .send(Method::POST, "/api/v1/cache/invalidate", Some(UserRole::Admin), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, "x-cache-invalidation").is_none());
    assert_eq!(json_body(response).await["data"]["invalidated"], true);

    let listing = app.get("/api/v1/products", Some(UserRole::User)).await;
    assert_eq!(header(&listing, "x-cache"), Some("MISS"));
}

#[tokio::test]
async fn test_failed_invalidate_is_not_a_server_error() {
    let app = TestApp::with_broken_cache(catalog(1));

    let response = app
        .send(Method::POST, "/api/v1/cache/invalidate", Some(UserRole::Admin), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-cache-invalidation"), Some("failed"));

    let body = json_body(response).await;
    assert_eq!(body["data"]["invalidated"], false);
    assert!(body["data"]["error"].is_string());
}
