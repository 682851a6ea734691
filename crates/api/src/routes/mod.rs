//! Route tree assembly.
//!
//! Route hierarchy:
//!
//! ```text
//! /health                              configuration presence (no chain)
//!
//! /v1/public/projects                  public list (rate-limited by IP)
//! /v1/public/projects/{id}             public read
//! /v1/public/projects/{id}/segments    nested public read
//! /v1/public/projects/{id}/hierarchy   composed public document
//! /v1/public/segments/{id}/prompts     nested public read
//!
//! /v1/projects, /v1/segments,          owner-scoped CRUD (bearer token,
//! /v1/prompts, /v1/validators          rate-limited by user)
//!
//! /v1/admin/projects|stats|users       admin reads (role admin)
//!
//! /webhooks/stripe                     signed provider callback (no chain)
//! ```

pub mod admin;
pub mod health;
pub mod owned;
pub mod public;
pub mod webhooks;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::auth::auth_context;
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// The auth-context layer wraps the owned and admin groups here so both see
/// the same resolved caller; their own gates run inside it.
pub fn v1_routes(state: AppState) -> Router<AppState> {
    let authed = Router::new()
        .merge(owned::router(state.clone()))
        .nest("/admin", admin::router(state.clone()))
        .layer(from_fn_with_state(state.clone(), auth_context));

    Router::new()
        .nest("/public", public::router(state))
        .merge(authed)
}
