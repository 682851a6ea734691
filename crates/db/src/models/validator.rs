//! Validator entity model and DTOs.
//!
//! A validator is a free-text acceptance check attached to a prompt.

use promptrepo_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::DeclaredFields;

/// A validator row from the `validators` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Validator {
    pub id: EntityId,
    pub prompt_id: EntityId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a validator under a prompt the caller owns.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateValidator {
    #[validate(required(message = "Prompt ID is required"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub prompt_id: Option<EntityId>,
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters")
    )]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub title: Option<String>,
    #[validate(
        required(message = "Body is required"),
        length(min = 1, message = "Body must not be empty")
    )]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub body: Option<String>,
}

impl DeclaredFields for CreateValidator {
    const FIELDS: &'static [&'static str] = &["prompt_id", "title", "body"];
}

/// DTO for updating a validator. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateValidator {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub body: Option<String>,
}

impl DeclaredFields for UpdateValidator {
    const FIELDS: &'static [&'static str] = &["title", "body"];
}
