//! Repository for the `segments` table, scoped through the owning project.

use promptrepo_core::error::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::segment::{CreateSegment, Segment, UpdateSegment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, position, created_at, updated_at";

/// CRUD operations for segments. Every query walks the segment → project
/// chain so only the project owner can touch its segments.
pub struct SegmentRepo;

impl SegmentRepo {
    /// Insert a new segment, returning the created row.
    ///
    /// The insert is guarded by an ownership subquery: if the target project
    /// does not exist or is not owned by `owner_id`, nothing is inserted and
    /// the caller gets FORBIDDEN. Position defaults to 0.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: &CreateSegment,
    ) -> AppResult<Segment> {
        let query = format!(
            "INSERT INTO segments (project_id, name, position)
             SELECT p.id, $3, COALESCE($4, 0)
             FROM projects p
             WHERE p.id = $2 AND p.owner_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Segment>(&query)
            .bind(owner_id)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.position)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::forbidden("Access denied"))
    }

    /// Update one of the caller's segments. Only non-`None` fields in
    /// `input` are applied; `updated_at` is always touched.
    pub async fn update_owned(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        input: &UpdateSegment,
    ) -> AppResult<Segment> {
        let query = format!(
            "UPDATE segments SET
                name = COALESCE($3, name),
                position = COALESCE($4, position),
                updated_at = NOW()
             WHERE id = $1 AND EXISTS (
                 SELECT 1 FROM projects p
                 WHERE p.id = segments.project_id AND p.owner_id = $2
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Segment>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.position)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Delete one of the caller's segments. Child prompts cascade.
    pub async fn delete_owned(pool: &PgPool, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM segments
             WHERE id = $1 AND EXISTS (
                 SELECT 1 FROM projects p
                 WHERE p.id = segments.project_id AND p.owner_id = $2
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
        AppError::not_found("Segment", Some(id)).with_message("Segment not found")
    }
}
