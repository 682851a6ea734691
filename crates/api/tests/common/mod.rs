#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use uuid::Uuid;

use promptrepo_api::auth::jwt::Claims;
use promptrepo_api::config::ApiConfig;
use promptrepo_api::middleware::rate_limit::RateLimiter;
use promptrepo_api::router::build_app_router;
use promptrepo_api::state::AppState;

/// Signing secret every test token is minted with; matches
/// [`test_config`]'s `supabase_jwt_secret`.
pub const JWT_SECRET: &str = "test-signing-secret";

/// Webhook secret matching [`test_config`]'s `stripe_webhook_secret`.
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// A connection string no Postgres listens on. Queries against it surface
/// as transport errors, which is exactly what the degraded-store tests need.
const UNREACHABLE_DATABASE_URL: &str = "postgres://nobody@127.0.0.1:1/void";

/// Build a test `ApiConfig` with safe defaults.
///
/// Token verification and webhook intake are configured so those paths are
/// exercisable; `database_url` and `redis_url` stay unset, so `/health`
/// reports every integration absent and rate limiting is off.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        database_url: None,
        supabase_jwt_secret: Some(JWT_SECRET.to_string()),
        redis_url: None,
        stripe_secret_key: None,
        stripe_webhook_secret: Some(WEBHOOK_SECRET.to_string()),
        rate_limit_fail_open: true,
        rate_limit_public_max: 60,
        rate_limit_user_max: 120,
        rate_limit_window_secs: 60,
    }
}

/// Build the full application router against an unreachable store.
///
/// This mirrors the router construction in `main.rs` so tests exercise the
/// same middleware stack production uses. The pool connects lazily; routes
/// that never reach the store behave exactly as in production, and routes
/// that do surface the INTERNAL degraded path.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(config: ApiConfig) -> Router {
    let pool = promptrepo_db::create_pool_lazy(UNREACHABLE_DATABASE_URL)
        .expect("lazy pool construction cannot fail on a well-formed URL");
    let limiter = RateLimiter::new(config.redis_url.as_deref());

    build_app_router(AppState {
        pool,
        config: Arc::new(config),
        limiter: Arc::new(limiter),
    })
}

/// Mint a bearer token the test config's secret verifies.
pub fn sign_token(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id,
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

// -- request helpers ---------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be JSON")
}

/// Assert the `{ok:false, error:{code, message}}` envelope and return the
/// error object for further checks.
pub async fn expect_error(
    response: Response<Body>,
    status: StatusCode,
    code: &str,
) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], code);
    json["error"].clone()
}
