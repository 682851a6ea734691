//! Validated request extractors.
//!
//! [`ValidatedJson`] and [`ValidatedQuery`] run the declared field rules
//! before a handler sees the payload, rejecting failures with a
//! VALIDATION_ERROR whose `details.errors` lists `{path, message, code}`
//! entries in field-declaration order.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use promptrepo_core::AppError;
use promptrepo_db::models::DeclaredFields;
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON body extractor that deserializes strictly and applies the DTO's
/// validation rules.
///
/// Distinguishes three failures, all 400 VALIDATION_ERROR:
/// - unparseable bytes: "Invalid JSON in request body"
/// - parseable JSON that does not fit the DTO (unknown field, wrong type):
///   "Invalid request body" with a single `body` entry
/// - shape-valid input breaking a field rule: "Invalid request body" with
///   one entry per failed field
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + DeclaredFields,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::from(AppError::validation("Invalid request body")))?;

        let raw: JsonValue = serde_json::from_slice(&bytes)
            .map_err(|_| ApiError::from(AppError::validation("Invalid JSON in request body")))?;

        let payload: T = serde_json::from_value(raw).map_err(|err| {
            ApiError::from(
                AppError::validation("Invalid request body").with_details(json!({
                    "errors": [{
                        "path": "body",
                        "message": err.to_string(),
                        "code": "invalid_shape",
                    }],
                })),
            )
        })?;

        payload
            .validate()
            .map_err(|errors| field_errors::<T>("Invalid request body", errors))?;

        Ok(Self(payload))
    }
}

/// Query-string extractor with the same validation contract as
/// [`ValidatedJson`], reported as "Invalid query parameters".
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + DeclaredFields,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::from(AppError::validation("Invalid query parameters")))?;

        params
            .validate()
            .map_err(|errors| field_errors::<T>("Invalid query parameters", errors))?;

        Ok(Self(params))
    }
}

/// Parse a path id, rejecting non-UUIDs before any data access.
///
/// `resource` is the lowercase noun for the message, e.g. "project" for
/// "Invalid project ID format".
pub fn parse_uuid(resource: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::validation(format!("Invalid {resource} ID format")).into())
}

/// Flatten validator output into ordered `{path, message, code}` entries.
/// The DTO's declared field order fixes the entry order; the validator's own
/// map is unordered.
fn field_errors<T: DeclaredFields>(message: &str, errors: ValidationErrors) -> ApiError {
    let by_field = errors.field_errors();
    let mut entries = Vec::new();
    for field in T::FIELDS {
        if let Some(list) = by_field.get(field) {
            for error in list.iter() {
                entries.push(json!({
                    "path": field,
                    "message": error.message.as_deref().unwrap_or("Invalid value"),
                    "code": error.code.as_ref(),
                }));
            }
        }
    }
    AppError::validation(message)
        .with_details(json!({ "errors": entries }))
        .into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
