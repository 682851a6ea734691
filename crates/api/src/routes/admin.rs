//! Route definitions for the `/v1/admin` surface.

use axum::extract::Request;
use axum::middleware::{from_fn, from_fn_with_state, Next};
use axum::routing::get;
use axum::Router;

use promptrepo_db::models::profile::Role;

use crate::handlers::admin;
use crate::middleware::rate_limit;
use crate::middleware::rbac::{require_auth, require_role};
use crate::state::AppState;

/// Routes mounted at `/v1/admin`. Chain (outermost first): auth-context ->
/// require-auth -> require-role(admin) -> rate-limit(user) -> handler.
///
/// ```text
/// GET /projects   -> list_projects  (all owners, any visibility)
/// GET /stats      -> stats
/// GET /users      -> list_users
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/projects", get(admin::list_projects))
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::list_users))
        .layer(from_fn_with_state(state, rate_limit::user))
        .layer(from_fn(|req: Request, next: Next| {
            require_role(Role::Admin, req, next)
        }))
        .layer(from_fn(require_auth))
}
