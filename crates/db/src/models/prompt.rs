//! Prompt entity model and DTOs.

use promptrepo_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::DeclaredFields;

/// Natural language a prompt is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "prompt_language")]
pub enum Language {
    #[serde(rename = "en")]
    #[sqlx(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    #[sqlx(rename = "pt-BR")]
    PtBr,
}

/// Conversational role the prompt text plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "prompt_kind", rename_all = "lowercase")]
pub enum PromptKind {
    Prompt,
    System,
    Tool,
}

/// A prompt row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prompt {
    pub id: EntityId,
    pub segment_id: EntityId,
    pub title: String,
    pub body: String,
    pub language: Language,
    pub kind: PromptKind,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a prompt under a segment the caller owns.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePrompt {
    #[validate(required(message = "Segment ID is required"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub segment_id: Option<EntityId>,
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
    /// Defaults to `pt-BR` if omitted.
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub language: Option<Language>,
    /// Defaults to `prompt` if omitted.
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub kind: Option<PromptKind>,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0, message = "Position must be zero or greater"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub position: Option<i32>,
}

impl DeclaredFields for CreatePrompt {
    const FIELDS: &'static [&'static str] =
        &["segment_id", "title", "body", "language", "kind", "position"];
}

/// DTO for updating a prompt. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePrompt {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub language: Option<Language>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub kind: Option<PromptKind>,
    #[validate(range(min = 0, message = "Position must be zero or greater"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub position: Option<i32>,
}

impl DeclaredFields for UpdatePrompt {
    const FIELDS: &'static [&'static str] = &["title", "body", "language", "kind", "position"];
}
