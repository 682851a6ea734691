//! Store-error → taxonomy translation.
//!
//! Every repository funnels its `sqlx::Error` through [`map_db_error`] so the
//! fixed mapping table lives in exactly one place. Driver details are logged
//! here and never surfaced to clients.

use promptrepo_core::error::AppError;

/// Postgres error code for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres error code for a foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres error code for insufficient privilege (row policy denial).
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Translate a store failure into the closed taxonomy.
///
/// Missing row → NOT_FOUND, unique violation → CONFLICT, foreign-key
/// violation → VALIDATION_ERROR, permission denial → FORBIDDEN, anything
/// else → INTERNAL with a sanitized message.
pub(crate) fn map_db_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource", None),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref().and_then(map_pg_code) {
            Some(mapped) => mapped,
            None => {
                tracing::error!(error = %db_err, "unmapped database error");
                AppError::internal("Database operation failed")
            }
        },
        other => {
            tracing::error!(error = %other, "database transport error");
            AppError::internal("Database operation failed")
        }
    }
}

fn map_pg_code(code: &str) -> Option<AppError> {
    match code {
        UNIQUE_VIOLATION => Some(AppError::conflict("Resource already exists")),
        FOREIGN_KEY_VIOLATION => Some(AppError::validation("Invalid reference")),
        INSUFFICIENT_PRIVILEGE => Some(AppError::forbidden("Access denied")),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
