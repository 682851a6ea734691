//! Authorization gates layered onto route groups.
//!
//! Both gates read the [`AuthContext`] extension, so they sit after
//! [`super::auth::auth_context`] in the chain. [`require_auth`] turns
//! anonymous callers into 401; [`require_role`] turns insufficient roles
//! into 403.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use promptrepo_core::AppError;
use promptrepo_db::models::profile::Role;

use crate::error::ApiError;
use crate::middleware::auth::AuthContext;

/// Reject anonymous callers with 401 UNAUTHORIZED.
pub async fn require_auth(req: Request, next: Next) -> Result<Response, ApiError> {
    let authed = req
        .extensions()
        .get::<AuthContext>()
        .is_some_and(|ctx| ctx.user().is_some());

    if !authed {
        return Err(AppError::unauthorized("Authentication required").into());
    }
    Ok(next.run(req).await)
}

/// Reject callers whose role does not meet `required` with 403 FORBIDDEN.
///
/// Compose with a closure at route registration:
///
/// ```ignore
/// .layer(from_fn(|req, next| require_role(Role::Admin, req, next)))
/// ```
pub async fn require_role(required: Role, req: Request, next: Next) -> Result<Response, ApiError> {
    let role = req
        .extensions()
        .get::<AuthContext>()
        .and_then(AuthContext::user)
        .map(|(_, role)| role);

    match role {
        Some(role) if role.meets(required) => Ok(next.run(req).await),
        Some(_) => Err(AppError::forbidden(role_message(required)).into()),
        None => Err(AppError::unauthorized("Authentication required").into()),
    }
}

fn role_message(required: Role) -> &'static str {
    match required {
        Role::Admin => "Admin role required",
        _ => "Pro role or higher required",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_required_role() {
        assert_eq!(role_message(Role::Admin), "Admin role required");
        assert_eq!(role_message(Role::Pro), "Pro role or higher required");
    }
}
