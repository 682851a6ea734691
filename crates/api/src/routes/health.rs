use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
///
/// Each integration flag reports whether its required configuration is
/// present, not whether the service answers; `/health` must stay cheap and
/// never error.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub supabase: bool,
    pub redis: bool,
    pub stripe: bool,
}

/// GET /health -- configuration presence per integration.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        supabase: state.config.supabase_configured(),
        redis: state.config.redis_configured(),
        stripe: state.config.stripe_configured(),
    })
}

/// Mount health check routes (root-level, not under `/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
