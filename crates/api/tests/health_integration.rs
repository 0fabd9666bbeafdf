//! Integration tests for health endpoints.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{create_test_app, parse_response_body, setup, test_config_with};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_reports_database_and_cache() {
    let pool = setup().await;
    let config = test_config_with(&[("resolution.cache_ttl_secs", "60")]);
    let app = create_test_app(config, pool.clone());

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
    assert_eq!(body["resolution"]["cache_enabled"], true);
    assert_eq!(body["resolution"]["cached_hosts"], 0);
}

#[tokio::test]
async fn test_probes() {
    let pool = setup().await;
    let app = create_test_app(common::test_config(), pool.clone());

    let response = app.clone().oneshot(get("/api/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "alive");

    let response = app.oneshot(get("/api/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "ready");
}
