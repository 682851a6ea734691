//! Closed error taxonomy shared by the storage and API layers.
//!
//! Every recoverable failure in the service is an [`AppError`] carrying one of
//! the seven [`ErrorCode`]s. The code is the single source of truth for the
//! HTTP status; handlers and middleware never invent ad-hoc statuses.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// The seven error kinds a response can carry. Closed set: anything that does
/// not fit maps to `Internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimit,
    Internal,
}

impl ErrorCode {
    /// Wire name, e.g. `VALIDATION_ERROR`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Code → HTTP status. The only place this mapping exists.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::RateLimit => 429,
            ErrorCode::Internal => 500,
        }
    }

    /// Translation key recorded alongside log entries for this kind.
    pub fn i18n_key(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "errors.validation",
            ErrorCode::Unauthorized => "errors.unauthorized",
            ErrorCode::Forbidden => "errors.forbidden",
            ErrorCode::NotFound => "errors.not_found",
            ErrorCode::Conflict => "errors.conflict",
            ErrorCode::RateLimit => "errors.rate_limit",
            ErrorCode::Internal => "errors.internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured service error: a taxonomy code, a human-readable message and
/// optional structured details (returned to the client verbatim, logged as
/// key names only).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<JsonValue>,
    pub i18n_key: &'static str,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            i18n_key: code.i18n_key(),
        }
    }

    /// Attach structured details. Detail values reach the client but never
    /// the logs (see [`AppError::detail_keys`]).
    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }

    /// Replace the message, keeping code and details. Used by handlers that
    /// want a route-specific wording for a generic failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Deterministic not-found message: `"{resource} not found"` or
    /// `"{resource} with id {id} not found"`.
    pub fn not_found(resource: &str, id: Option<Uuid>) -> Self {
        let message = match id {
            Some(id) => format!("{resource} with id {id} not found"),
            None => format!("{resource} not found"),
        };
        let mut details = Map::new();
        details.insert("resource".into(), JsonValue::String(resource.into()));
        if let Some(id) = id {
            details.insert("id".into(), JsonValue::String(id.to_string()));
        }
        Self::new(ErrorCode::NotFound, message).with_details(JsonValue::Object(details))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimit, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Detail key names for log records. Values are deliberately dropped so
    /// user data and secrets never land in logs.
    pub fn detail_keys(&self) -> Vec<&str> {
        match &self.details {
            Some(JsonValue::Object(map)) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- status mapping ------------------------------------------------------

    #[test]
    fn every_code_maps_to_its_status() {
        assert_eq!(ErrorCode::ValidationError.http_status(), 400);
        assert_eq!(ErrorCode::Unauthorized.http_status(), 401);
        assert_eq!(ErrorCode::Forbidden.http_status(), 403);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::Conflict.http_status(), 409);
        assert_eq!(ErrorCode::RateLimit.http_status(), 429);
        assert_eq!(ErrorCode::Internal.http_status(), 500);
    }

    #[test]
    fn wire_names_are_screaming_snake() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::RateLimit.as_str(), "RATE_LIMIT");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(
            serde_json::to_value(ErrorCode::ValidationError).unwrap(),
            json!("VALIDATION_ERROR")
        );
    }

    // -- not_found formatting ------------------------------------------------

    #[test]
    fn not_found_without_id() {
        let err = AppError::not_found("Project", None);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Project not found");
        assert_eq!(err.details, Some(json!({ "resource": "Project" })));
    }

    #[test]
    fn not_found_with_id() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let err = AppError::not_found("Project", Some(id));
        assert_eq!(
            err.message,
            "Project with id 550e8400-e29b-41d4-a716-446655440000 not found"
        );
        assert_eq!(
            err.details,
            Some(json!({
                "resource": "Project",
                "id": "550e8400-e29b-41d4-a716-446655440000"
            }))
        );
    }

    // -- redaction -----------------------------------------------------------

    #[test]
    fn detail_keys_drop_values() {
        let err = AppError::validation("Invalid request body")
            .with_details(json!({ "errors": [{ "path": "name" }], "hint": "secret" }));
        let mut keys = err.detail_keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["errors", "hint"]);
    }

    #[test]
    fn detail_keys_empty_without_details() {
        assert!(AppError::unauthorized("Authentication required")
            .detail_keys()
            .is_empty());
    }

    // -- constructors --------------------------------------------------------

    #[test]
    fn constructors_set_code_and_i18n_key() {
        assert_eq!(AppError::forbidden("x").code, ErrorCode::Forbidden);
        assert_eq!(AppError::forbidden("x").i18n_key, "errors.forbidden");
        assert_eq!(AppError::rate_limit("x").code, ErrorCode::RateLimit);
        assert_eq!(AppError::internal("x").i18n_key, "errors.internal");
    }

    #[test]
    fn with_message_keeps_code_and_details() {
        let err = AppError::not_found("Project", None).with_message("Project not found or not public");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Project not found or not public");
        assert_eq!(err.details, Some(json!({ "resource": "Project" })));
    }
}
