//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, send};
use libris_api::config::Service;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn catalog_health_names_the_service(pool: PgPool) {
    let app = common::build_test_app(pool, Service::Catalog);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "healthy", "service": "catalog-service"})
    );
}

#[sqlx::test]
async fn user_health_names_the_service(pool: PgPool) {
    let app = common::build_test_app(pool, Service::Users);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "healthy", "service": "user-service"})
    );
}

// No schema is created here; liveness must not depend on it.
#[sqlx::test]
async fn health_does_not_need_the_schema(pool: PgPool) {
    let app = common::build_test_app(pool, Service::Catalog);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
}

// Liveness is reported even when the database cannot be reached.
#[sqlx::test]
async fn health_reports_healthy_with_closed_pool(pool: PgPool) {
    pool.close().await;
    let app = common::build_test_app(pool, Service::Catalog);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "healthy", "service": "catalog-service"})
    );
}

#[sqlx::test]
async fn unknown_route_returns_json_404(pool: PgPool) {
    let app = common::build_test_app(pool, Service::Catalog);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Not found"}));
}

#[sqlx::test]
async fn services_only_mount_their_own_resource(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Service::Catalog);
    assert_eq!(get(app, "/users").await.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool, Service::Users);
    assert_eq!(get(app, "/catalog").await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool, Service::Catalog);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(
        request_id.to_str().unwrap().len(),
        36,
        "x-request-id should be a UUID string"
    );
}

#[sqlx::test]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool, Service::Catalog);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/catalog")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
