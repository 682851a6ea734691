//! Error-to-response translation for the HTTP layer.
//!
//! Repositories and middleware produce [`AppError`] values; this module turns
//! them into the `{ok: false, error: {...}}` envelope at the status the
//! taxonomy code dictates, logging a redacted record on the way out.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use promptrepo_core::{AppError, ErrorCode};
use serde_json::json;

/// Newtype over [`AppError`] so the axum conversion can live in this crate.
///
/// Handlers return `ApiResult<T>`; `?` on a repository call converts
/// automatically via the `From` impl.
#[derive(Debug, Clone)]
pub struct ApiError(pub AppError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError(err) = self;

        // Detail values can carry user input; log the key names only.
        let detail_keys = err.detail_keys();
        if err.code == ErrorCode::Internal {
            tracing::error!(
                code = %err.code,
                message = %err.message,
                i18n_key = err.i18n_key,
                detail_keys = ?detail_keys,
                "Request failed"
            );
        } else {
            tracing::warn!(
                code = %err.code,
                message = %err.message,
                i18n_key = err.i18n_key,
                detail_keys = ?detail_keys,
                "Request rejected"
            );
        }

        let status = StatusCode::from_u16(err.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut error = json!({
            "code": err.code.as_str(),
            "message": err.message,
        });
        if let Some(details) = err.details {
            error["details"] = details;
        }

        (status, Json(json!({ "ok": false, "error": error }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
