//! Request handlers.
//!
//! Each submodule provides async handler functions for one surface. Handlers
//! call exactly one repository function in `promptrepo_db` and wrap the
//! outcome in the response envelope; errors propagate as [`crate::error::ApiError`].

pub mod admin;
pub mod project;
pub mod prompt;
pub mod public;
pub mod segment;
pub mod validator;
pub mod webhooks;
