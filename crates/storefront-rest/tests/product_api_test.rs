mod common;

use axum::http::{Method, StatusCode};
use common::{catalog, header, json_body, TestApp};
use serde_json::json;
use storefront_core::UserRole;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new(Vec::new());
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_products_require_token() {
    let app = TestApp::new(catalog(3));
    let response = app.get("/api/v1/products", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_list_misses_then_hits() {
    let app = TestApp::new(catalog(25));

    let first = app.get("/api/v1/products?page=2&limit=10", Some(UserRole::User)).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(header(&first, "x-cache"), Some("MISS"));
    let reads_after_miss = app.repository.read_count();
    let first_body = json_body(first).await;

    let second = app.get("/api/v1/products?page=2&limit=10", Some(UserRole::User)).await;
    assert_eq!(header(&second, "x-cache"), Some("HIT"));
    assert_eq!(app.repository.read_count(), reads_after_miss);

    let second_body = json_body(second).await;
    assert_eq!(first_body["data"], second_body["data"]);
    assert_eq!(second_body["data"]["total"], 25);
    assert_eq!(second_body["data"]["products"][0]["id"], 11);
    assert_eq!(second_body["data"]["products"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_category_filter_served_from_catalog() {
    let app = TestApp::new(catalog(6));
    app.get("/api/v1/products", Some(UserRole::User)).await;

    let response = app
        .get("/api/v1/products?category_id=2", Some(UserRole::User))
        .await;
    assert_eq!(header(&response, "x-cache"), Some("HIT"));
    let body = json_body(response).await;
    assert_eq!(body["data"]["total"], 3);
}

#[tokio::test]
async fn test_non_integer_category_is_empty_page() {
    let app = TestApp::new(catalog(4));
    let response = app
        .get("/api/v1/products?category_id=shoes", Some(UserRole::User))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["total"], 0);
    assert!(body["data"]["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sorted_listing_bypasses_cache() {
    let app = TestApp::new(catalog(4));
    for _ in 0..2 {
        let response = app
            .get("/api/v1/products?sort=price&order=desc", Some(UserRole::User))
            .await;
        assert_eq!(header(&response, "x-cache"), Some("MISS"));
        let body = json_body(response).await;
        assert_eq!(body["data"]["products"][0]["id"], 4);
    }
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_get_product_paths() {
    let app = TestApp::new(catalog(2));

    let bad = app.get("/api/v1/products/abc", Some(UserRole::User)).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let missing = app.get("/api/v1/products/99", Some(UserRole::User)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(missing).await["error"]["code"], "NOT_FOUND");

    let first = app.get("/api/v1/products/2", Some(UserRole::User)).await;
    assert_eq!(header(&first, "x-cache"), Some("MISS"));
    let second = app.get("/api/v1/products/2", Some(UserRole::User)).await;
    assert_eq!(header(&second, "x-cache"), Some("HIT"));
    assert_eq!(json_body(second).await["data"]["name"], "Product 2");
}

#[tokio::test]
async fn test_writes_require_admin() {
    let app = TestApp::new(catalog(1));
    let body = json!({ "name": "Desk lamp", "price": 19.5 });

    let anonymous = app
        .send(Method::POST, "/api/v1/products", None, Some(body.clone()))
        .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let shopper = app
        .send(Method::POST, "/api/v1/products", Some(UserRole::User), Some(body))
        .await;
    assert_eq!(shopper.status(), StatusCode::FORBIDDEN);

    let delete = app
        .send(Method::DELETE, "/api/v1/products/1", Some(UserRole::User), None)
        .await;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_invalidates_lists() {
    let app = TestApp::new(catalog(2));
    app.get("/api/v1/products", Some(UserRole::User)).await;

    let created = app
        .send(
            Method::POST,
            "/api/v1/products",
            Some(UserRole::Admin),
            Some(json!({ "name": "Desk lamp", "price": 19.5, "stock": 4 })),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(header(&created, "x-cache-invalidation").is_none());
    assert_eq!(json_body(created).await["data"]["id"], 3);

    let listing = app.get("/api/v1/products", Some(UserRole::User)).await;
    assert_eq!(header(&listing, "x-cache"), Some("MISS"));
    assert_eq!(json_body(listing).await["data"]["total"], 3);
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let app = TestApp::new(Vec::new());

    let response = app
        .send(
            Method::POST,
            "/api/v1/products",
            Some(UserRole::Admin),
            Some(json!({ "name": "Lamp", "price": 0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "price");
}

#[tokio::test]
async fn test_malformed_list_query_uses_error_envelope() {
    let app = TestApp::new(catalog(3));
    let reads_before = app.repository.read_count();

    let response = app
        .get("/api/v1/products?limit=abc", Some(UserRole::User))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(app.repository.read_count(), reads_before);
}

#[tokio::test]
async fn test_update_drops_cached_product() {
    let app = TestApp::new(catalog(2));
    app.get("/api/v1/products/1", Some(UserRole::User)).await;

    let updated = app
        .send(
            Method::PUT,
            "/api/v1/products/1",
            Some(UserRole::Admin),
            Some(json!({ "price": 42.0 })),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(json_body(updated).await["data"]["price"], 42.0);

    let fetched = app.get("/api/v1/products/1", Some(UserRole::User)).await;
    assert_eq!(header(&fetched, "x-cache"), Some("MISS"));
    assert_eq!(json_body(fetched).await["data"]["price"], 42.0);
}

#[tokio::test]
async fn test_delete_returns_no_content() {
    let app = TestApp::new(catalog(2));

    let deleted = app
        .send(Method::DELETE, "/api/v1/products/2", Some(UserRole::Admin), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = app
        .send(Method::DELETE, "/api/v1/products/2", Some(UserRole::Admin), None)
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_write_reports_failed_invalidation() {
    let app = TestApp::with_broken_cache(catalog(1));

    let response = app
        .send(
            Method::PUT,
            "/api/v1/products/1",
            Some(UserRole::Admin),
            Some(json!({ "stock": 9 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-cache-invalidation"), Some("failed"));
    assert_eq!(json_body(response).await["data"]["stock"], 9);
}

#[tokio::test]
async fn test_broken_cache_still_serves_reads() {
    let app = TestApp::with_broken_cache(catalog(3));
    let response = app.get("/api/v1/products", Some(UserRole::User)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-cache"), Some("MISS"));
    assert_eq!(json_body(response).await["data"]["total"], 3);
}
