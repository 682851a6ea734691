//! Repository for the `projects` table, scoped to the owning user.

use promptrepo_core::error::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, visibility, created_at, updated_at";

/// CRUD operations for projects owned by the calling user.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    ///
    /// Visibility defaults to `private` if omitted. Any `owner_id` supplied
    /// in the DTO is ignored.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: &CreateProject,
    ) -> AppResult<Project> {
        let query = format!(
            "INSERT INTO projects (owner_id, name, description, visibility)
             VALUES ($1, $2, $3, COALESCE($4, 'private'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.visibility)
            .fetch_one(pool)
            .await
            .map_err(map_db_error)
    }

    /// List the caller's projects, most recently created first.
    pub async fn list_owned(pool: &PgPool, owner_id: Uuid) -> AppResult<Vec<Project>> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_error)
    }

    /// Fetch one of the caller's projects by id.
    pub async fn find_owned(pool: &PgPool, owner_id: Uuid, id: Uuid) -> AppResult<Project> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Update one of the caller's projects. Only non-`None` fields in
    /// `input` are applied; `updated_at` is always touched.
    pub async fn update_owned(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                visibility = COALESCE($5, visibility),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.visibility)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Delete one of the caller's projects. Child rows cascade in the store.
    pub async fn delete_owned(pool: &PgPool, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
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

    // A project outside the caller's ownership is indistinguishable from an
    // absent one.
    fn not_found(id: Uuid) -> AppError {
        AppError::not_found("Project", Some(id)).with_message("Project not found")
    }
}
