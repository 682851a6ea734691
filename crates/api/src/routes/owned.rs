//! Route definitions for the authenticated, owner-scoped content resources.

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, prompt, segment, validator};
use crate::middleware::rate_limit;
use crate::middleware::rbac::require_auth;
use crate::state::AppState;

/// Routes mounted at `/v1`. Chain (outermost first): auth-context ->
/// require-auth -> rate-limit(user) -> handler. The auth-context layer is
/// applied by the caller so the admin group can share it.
///
/// Child entities have no standalone GET routes; reads flow through the
/// public tree or the owning project.
///
/// ```text
/// GET    /projects            -> list
/// POST   /projects            -> create
/// GET    /projects/{id}       -> get_by_id
/// PATCH  /projects/{id}       -> update
/// DELETE /projects/{id}       -> delete
///
/// POST   /segments            -> create
/// PATCH  /segments/{id}       -> update
/// DELETE /segments/{id}       -> delete
///
/// POST   /prompts             -> create
/// PATCH  /prompts/{id}        -> update
/// DELETE /prompts/{id}        -> delete
///
/// POST   /validators          -> create
/// PATCH  /validators/{id}     -> update
/// DELETE /validators/{id}     -> delete
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route("/segments", post(segment::create))
        .route(
            "/segments/{id}",
            axum::routing::patch(segment::update).delete(segment::delete),
        )
        .route("/prompts", post(prompt::create))
        .route(
            "/prompts/{id}",
            axum::routing::patch(prompt::update).delete(prompt::delete),
        )
        .route("/validators", post(validator::create))
        .route(
            "/validators/{id}",
            axum::routing::patch(validator::update).delete(validator::delete),
        )
        // Layers run outermost-last: require-auth gates before the per-user
        // counter is touched.
        .layer(from_fn_with_state(state, rate_limit::user))
        .layer(from_fn(require_auth))
}
