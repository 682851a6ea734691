//! Repository for the `prompts` table, scoped through segment → project.

use promptrepo_core::error::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, segment_id, title, body, language, kind, position, created_at, \
    updated_at";

/// CRUD operations for prompts. Ownership is established by walking
/// prompt → segment → project to the owning user.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a new prompt, returning the created row.
    ///
    /// Guarded by an ownership subquery over the parent segment's project;
    /// a foreign or absent segment inserts nothing and yields FORBIDDEN.
    /// Defaults: language `pt-BR`, kind `prompt`, position 0.
    pub async fn create(pool: &PgPool, owner_id: Uuid, input: &CreatePrompt) -> AppResult<Prompt> {
        let query = format!(
            "INSERT INTO prompts (segment_id, title, body, language, kind, position)
             SELECT s.id, $3, $4, COALESCE($5, 'pt-BR'), COALESCE($6, 'prompt'), COALESCE($7, 0)
             FROM segments s
             JOIN projects p ON p.id = s.project_id
             WHERE s.id = $2 AND p.owner_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(owner_id)
            .bind(input.segment_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.language)
            .bind(input.kind)
            .bind(input.position)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::forbidden("Access denied"))
    }

    /// Update one of the caller's prompts. Only non-`None` fields in `input`
    /// are applied; `updated_at` is always touched.
    pub async fn update_owned(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        input: &UpdatePrompt,
    ) -> AppResult<Prompt> {
        let query = format!(
            "UPDATE prompts SET
                title = COALESCE($3, title),
                body = COALESCE($4, body),
                language = COALESCE($5, language),
                kind = COALESCE($6, kind),
                position = COALESCE($7, position),
                updated_at = NOW()
             WHERE id = $1 AND EXISTS (
                 SELECT 1 FROM segments s
                 JOIN projects p ON p.id = s.project_id
                 WHERE s.id = prompts.segment_id AND p.owner_id = $2
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.language)
            .bind(input.kind)
            .bind(input.position)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Delete one of the caller's prompts. Child validators cascade.
    pub async fn delete_owned(pool: &PgPool, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM prompts
             WHERE id = $1 AND EXISTS (
                 SELECT 1 FROM segments s
                 JOIN projects p ON p.id = s.project_id
                 WHERE s.id = prompts.segment_id AND p.owner_id = $2
             )",
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::not_found("Prompt", Some(id)).with_message("Prompt not found")
    }
}
