//! Segment entity model and DTOs.

use promptrepo_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::DeclaredFields;

/// A segment row from the `segments` table. Segments order a project's
/// prompts into named groups via `position`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Segment {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a segment under a project the caller owns.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateSegment {
    #[validate(required(message = "Project ID is required"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub project_id: Option<EntityId>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters")
    )]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0, message = "Position must be zero or greater"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub position: Option<i32>,
}

impl DeclaredFields for CreateSegment {
    const FIELDS: &'static [&'static str] = &["project_id", "name", "position"];
}

/// DTO for updating a segment. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateSegment {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Position must be zero or greater"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub position: Option<i32>,
}

impl DeclaredFields for UpdateSegment {
    const FIELDS: &'static [&'static str] = &["name", "position"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_position_is_rejected() {
        let dto: CreateSegment = serde_json::from_value(serde_json::json!({
            "project_id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "intro",
            "position": -1,
        }))
        .unwrap();
        let errs = dto.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("position"));
    }

    #[test]
    fn explicit_null_patch_field_is_rejected() {
        let res = serde_json::from_value::<UpdateSegment>(serde_json::json!({ "name": null }));
        assert!(res.is_err());
    }
}
