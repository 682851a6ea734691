//! Route definitions for provider webhooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`. No middleware chain: the raw body must
/// reach the handler unconsumed for signature verification.
///
/// ```text
/// POST /stripe -> stripe
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/stripe", post(webhooks::stripe))
}
