//! Integration tests for the authentication and authorization gates.
//!
//! None of these need a live store: rejection happens before any data
//! access, and a failed role lookup (the store here is unreachable)
//! degrades the caller to anonymous by design.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, delete, expect_error, get, get_auth, post_json, sign_token};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: every owner-scoped surface rejects anonymous callers with 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owned_routes_require_a_bearer_token() {
    let id = Uuid::new_v4();
    let uris = ["/v1/projects".to_string(), format!("/v1/projects/{id}")];
    for uri in uris {
        let response = get(build_test_app(), &uri).await;
        let error = expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
        assert_eq!(error["message"], "Authentication required");
    }
}

#[tokio::test]
async fn owned_writes_require_a_bearer_token() {
    let response = post_json(build_test_app(), "/v1/segments", r#"{"name": "Intro"}"#).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    let response = post_json(build_test_app(), "/v1/prompts", "{}").await;
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    let id = Uuid::new_v4();
    let response = delete(build_test_app(), &format!("/v1/validators/{id}")).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Test: malformed and unverifiable tokens degrade to anonymous, then 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn garbage_token_is_anonymous() {
    let response = get_auth(build_test_app(), "/v1/projects", "not-a-jwt").await;
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn non_bearer_authorization_header_is_anonymous() {
    let app = build_test_app();
    let request = axum::http::Request::builder()
        .uri("/v1/projects")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Test: a valid token with an unreachable profile store degrades to 401,
// not 500 -- authentication failure is never fatal on its own
// ---------------------------------------------------------------------------

#[tokio::test]
async fn role_lookup_failure_degrades_to_anonymous() {
    let token = sign_token(Uuid::new_v4());
    let response = get_auth(build_test_app(), "/v1/projects", &token).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Test: admin routes reject anonymous callers with 401 (the 403 path needs
// a live profile row; see the live suite)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_authentication_first() {
    for uri in ["/v1/admin/projects", "/v1/admin/stats", "/v1/admin/users"] {
        let response = get(build_test_app(), uri).await;
        expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    }
}
