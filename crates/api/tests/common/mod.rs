#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use libris_api::config::{CorsOrigins, DatabaseConfig, ServerConfig, Service};
use libris_api::router::build_app_router;
use libris_api::state::AppState;
use libris_db::{PoolSettings, RetryPolicy};
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and a 30-second request
/// timeout. The connect options are never used: tests hand the router a
/// pool that is already open.
pub fn test_config(service: Service) -> ServerConfig {
    ServerConfig {
        service,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec![HeaderValue::from_static("http://localhost:5173")]),
        request_timeout_secs: 30,
        database: DatabaseConfig {
            connect_options: PgConnectOptions::new(),
            pool: PoolSettings::default(),
            retry: RetryPolicy::once(),
        },
    }
}

/// Create the service's table in the test database.
pub async fn init_schema(pool: &PgPool, service: Service) {
    match service {
        Service::Catalog => libris_db::schema::init_catalog_schema(pool).await.unwrap(),
        Service::Users => libris_db::schema::init_user_schema(pool).await.unwrap(),
    }
}

/// Build the full application router, middleware included, for `service`.
pub fn build_test_app(pool: PgPool, service: Service) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config(service)),
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    json_request(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    json_request(app, Method::PUT, uri, body.to_string()).await
}

/// Send `raw` verbatim with a JSON content type.
pub async fn json_request(app: Router, method: Method, uri: &str, raw: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();
    send(app, request).await
}

/// Send a request with no body and no content type.
pub async fn without_body(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
