//! Request middleware, composed per route group at registration time.
//!
//! - [`auth::auth_context`] -- resolves the bearer token into an
//!   [`auth::AuthContext`] extension; never rejects by itself.
//! - [`rbac::require_auth`] -- 401 for anonymous callers.
//! - [`rbac::require_role`] -- 403 for insufficient roles.
//! - [`rate_limit`] -- fixed-window counters keyed by IP or user id.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
