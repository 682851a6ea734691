//! Route definitions for the anonymous `/v1/public` read surface.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Routes mounted at `/v1/public`. Chain: rate-limit(public) -> handler.
///
/// ```text
/// GET /projects                   -> list_projects
/// GET /projects/{id}              -> get_project
/// GET /projects/{id}/segments     -> list_segments
/// GET /projects/{id}/hierarchy    -> project_hierarchy
/// GET /segments/{id}/prompts      -> list_prompts
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/projects", get(public::list_projects))
        .route("/projects/{id}", get(public::get_project))
        .route("/projects/{id}/segments", get(public::list_segments))
        .route("/projects/{id}/hierarchy", get(public::project_hierarchy))
        .route("/segments/{id}/prompts", get(public::list_prompts))
        .layer(from_fn_with_state(state, rate_limit::public))
}
