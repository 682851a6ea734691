//! Project entity model and DTOs.

use promptrepo_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::DeclaredFields;

/// Whether a project is reachable through the public read surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "visibility", rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. Fields may be omitted where noted, but an
/// explicit `null` is rejected as a type error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProject {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters")
    )]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub description: Option<String>,
    /// Defaults to `private` if omitted.
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub visibility: Option<Visibility>,
    /// Ignored; the owner is always the authenticated caller.
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub owner_id: Option<EntityId>,
}

impl DeclaredFields for CreateProject {
    const FIELDS: &'static [&'static str] = &["name", "description", "visibility", "owner_id"];
}

/// DTO for updating a project. All fields are optional; an absent field
/// leaves the column unchanged and an explicit `null` is rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub visibility: Option<Visibility>,
}

impl DeclaredFields for UpdateProject {
    const FIELDS: &'static [&'static str] = &["name", "description", "visibility"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_create_body_reports_missing_name() {
        let dto: CreateProject = serde_json::from_value(serde_json::json!({})).unwrap();
        let errs = dto.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("name"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let dto: CreateProject =
            serde_json::from_value(serde_json::json!({ "name": "x".repeat(101) })).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn unknown_body_fields_are_rejected() {
        let res =
            serde_json::from_value::<CreateProject>(serde_json::json!({ "name": "a", "bogus": 1 }));
        assert!(res.is_err());
    }

    #[test]
    fn owner_id_is_accepted_but_carries_no_rules() {
        let dto: CreateProject = serde_json::from_value(serde_json::json!({
            "name": "a",
            "owner_id": "550e8400-e29b-41d4-a716-446655440000",
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn empty_patch_body_is_valid() {
        let dto: UpdateProject = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn explicit_null_fields_are_rejected() {
        // Absence skips the column; null is not a way to spell absence.
        let res = serde_json::from_value::<UpdateProject>(
            serde_json::json!({ "description": null }),
        );
        assert!(res.is_err());

        let res = serde_json::from_value::<CreateProject>(serde_json::json!({ "name": null }));
        assert!(res.is_err());
    }
}
