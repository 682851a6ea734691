//! Request authentication: bearer token to caller identity.
//!
//! [`auth_context`] resolves the `Authorization` header into an
//! [`AuthContext`] request extension. It never rejects a request by itself;
//! the gates in [`super::rbac`] do that.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use promptrepo_core::types::EntityId;
use promptrepo_core::AppError;
use promptrepo_db::models::profile::Role;
use promptrepo_db::repositories::ProfileRepo;

use crate::auth::jwt::validate_token;
use crate::error::ApiError;
use crate::state::AppState;

/// The caller identity attached to every request behind [`auth_context`].
#[derive(Debug, Clone)]
pub enum AuthContext {
    Anonymous,
    User { id: EntityId, role: Role },
}

impl AuthContext {
    pub fn user(&self) -> Option<(EntityId, Role)> {
        match *self {
            AuthContext::User { id, role } => Some((id, role)),
            AuthContext::Anonymous => None,
        }
    }
}

/// Resolve the bearer token into an [`AuthContext`] extension.
///
/// Absent, malformed, expired or otherwise invalid tokens degrade to
/// [`AuthContext::Anonymous`] and the request proceeds; so does a failed
/// role lookup. Public routes stay reachable when the identity provider
/// misbehaves.
pub async fn auth_context(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let ctx = resolve(&state, req.headers()).await;
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

async fn resolve(state: &AppState, headers: &HeaderMap) -> AuthContext {
    let Some(secret) = state.config.supabase_jwt_secret.as_deref() else {
        return AuthContext::Anonymous;
    };

    let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    else {
        return AuthContext::Anonymous;
    };

    let claims = match validate_token(token, secret) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            return AuthContext::Anonymous;
        }
    };

    // A subject without a profile row still authenticates with the default
    // role; only a lookup failure degrades the caller to anonymous.
    match ProfileRepo::find_role(&state.pool, claims.sub).await {
        Ok(role) => AuthContext::User {
            id: claims.sub,
            role,
        },
        Err(err) => {
            tracing::warn!(error = %err, "Role lookup failed, treating caller as anonymous");
            AuthContext::Anonymous
        }
    }
}

/// The authenticated caller, for handlers behind `require_auth`.
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> ApiResult<Json<()>> {
///     tracing::info!(user_id = %user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: EntityId,
    pub role: Role,
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .and_then(AuthContext::user)
            .map(|(id, role)| CurrentUser { id, role })
            .ok_or_else(|| AppError::unauthorized("Authentication required").into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
