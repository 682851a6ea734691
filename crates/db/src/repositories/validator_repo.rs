//! Repository for the `validators` table, scoped through prompt → segment →
//! project.

use promptrepo_core::error::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::validator::{CreateValidator, UpdateValidator, Validator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, prompt_id, title, body, created_at, updated_at";

/// CRUD operations for validators, the deepest level of the hierarchy.
pub struct ValidatorRepo;

impl ValidatorRepo {
    /// Insert a new validator, returning the created row.
    ///
    /// Guarded by an ownership subquery up the full parent chain; a foreign
    /// or absent prompt inserts nothing and yields FORBIDDEN.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: &CreateValidator,
    ) -> AppResult<Validator> {
        let query = format!(
            "INSERT INTO validators (prompt_id, title, body)
             SELECT pr.id, $3, $4
             FROM prompts pr
             JOIN segments s ON s.id = pr.segment_id
             JOIN projects p ON p.id = s.project_id
             WHERE pr.id = $2 AND p.owner_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Validator>(&query)
            .bind(owner_id)
            .bind(input.prompt_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::forbidden("Access denied"))
    }

    /// Update one of the caller's validators. Only non-`None` fields in
    /// `input` are applied; `updated_at` is always touched.
    pub async fn update_owned(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        input: &UpdateValidator,
    ) -> AppResult<Validator> {
        let query = format!(
            "UPDATE validators SET
                title = COALESCE($3, title),
                body = COALESCE($4, body),
                updated_at = NOW()
             WHERE id = $1 AND EXISTS (
                 SELECT 1 FROM prompts pr
                 JOIN segments s ON s.id = pr.segment_id
                 JOIN projects p ON p.id = s.project_id
                 WHERE pr.id = validators.prompt_id AND p.owner_id = $2
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Validator>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Delete one of the caller's validators.
    pub async fn delete_owned(pool: &PgPool, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM validators
             WHERE id = $1 AND EXISTS (
                 SELECT 1 FROM prompts pr
                 JOIN segments s ON s.id = pr.segment_id
                 JOIN projects p ON p.id = s.project_id
                 WHERE pr.id = validators.prompt_id AND p.owner_id = $2
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
        AppError::not_found("Validator", Some(id)).with_message("Validator not found")
    }
}
