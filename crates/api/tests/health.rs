//! Integration tests for the health endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, expect_error, get};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health reports configuration presence, never errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_unconfigured_integrations_as_false() {
    // Test config has no DATABASE_URL, REDIS_URL or STRIPE_SECRET_KEY.
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["supabase"], false);
    assert_eq!(json["redis"], false);
    assert_eq!(json["stripe"], false);
}

#[tokio::test]
async fn health_reports_configured_integrations_as_true() {
    let mut config = common::test_config();
    config.database_url = Some("postgres://localhost/app".into());
    config.redis_url = Some("redis://localhost".into());
    config.stripe_secret_key = Some("sk_test_123".into());

    let app = common::build_test_app_with(config);
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["supabase"], true);
    assert_eq!(json["redis"], true);
    assert_eq!(json["stripe"], true);
}

// ---------------------------------------------------------------------------
// Test: unknown routes return the NOT_FOUND envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_not_found_envelope() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    let error = expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    assert_eq!(error["message"], "Endpoint not found");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in every response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn error_responses_also_carry_a_request_id() {
    let app = common::build_test_app();
    let response = get(app, "/v1/projects").await;

    assert!(response.headers().get("x-request-id").is_some());
}

// ---------------------------------------------------------------------------
// Test: CORS preflight returns the configured origin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/public/projects")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");
}
