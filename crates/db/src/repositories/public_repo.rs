//! Read-only repository for the anonymous public surface.
//!
//! Every query filters on `visibility = 'public'` at the project level, so a
//! private or absent project (and anything beneath it) behaves as absent.

use promptrepo_core::error::{AppError, AppResult};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::project::Project;
use crate::models::prompt::Prompt;
use crate::models::segment::Segment;

const PROJECT_COLUMNS: &str = "id, owner_id, name, description, visibility, created_at, updated_at";

/// Read operations over publicly visible projects and their children.
pub struct PublicRepo;

impl PublicRepo {
    /// Page through public projects, most recently created first.
    pub async fn list_projects(pool: &PgPool, limit: i64, offset: i64) -> AppResult<Vec<Project>> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE visibility = 'public'
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(map_db_error)
    }

    /// Fetch a single public project by id.
    pub async fn find_project(pool: &PgPool, id: Uuid) -> AppResult<Project> {
        let query =
            format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND visibility = 'public'");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| Self::not_public(id))
    }

    /// List a public project's segments ordered by position.
    ///
    /// A private or absent project yields an empty list, the same as it
    /// would through a store-side row policy.
    pub async fn list_segments(pool: &PgPool, project_id: Uuid) -> AppResult<Vec<Segment>> {
        sqlx::query_as::<_, Segment>(
            "SELECT s.id, s.project_id, s.name, s.position, s.created_at, s.updated_at
             FROM segments s
             JOIN projects p ON p.id = s.project_id
             WHERE s.project_id = $1 AND p.visibility = 'public'
             ORDER BY s.position, s.created_at",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(map_db_error)
    }

    /// List a public segment's prompts ordered by position.
    pub async fn list_prompts(pool: &PgPool, segment_id: Uuid) -> AppResult<Vec<Prompt>> {
        sqlx::query_as::<_, Prompt>(
            "SELECT pr.id, pr.segment_id, pr.title, pr.body, pr.language, pr.kind, pr.position,
                    pr.created_at, pr.updated_at
             FROM prompts pr
             JOIN segments s ON s.id = pr.segment_id
             JOIN projects p ON p.id = s.project_id
             WHERE pr.segment_id = $1 AND p.visibility = 'public'
             ORDER BY pr.position, pr.created_at",
        )
        .bind(segment_id)
        .fetch_all(pool)
        .await
        .map_err(map_db_error)
    }

    /// Fetch a public project with its segments → prompts → validators as
    /// one nested document, composed store-side.
    ///
    /// Children are ordered by position (creation time as tiebreak) and
    /// empty levels come back as `[]`, never null.
    pub async fn project_hierarchy(pool: &PgPool, id: Uuid) -> AppResult<JsonValue> {
        sqlx::query_scalar::<_, JsonValue>(
            "SELECT jsonb_build_object(
                 'id', p.id,
                 'owner_id', p.owner_id,
                 'name', p.name,
                 'description', p.description,
                 'visibility', p.visibility,
                 'created_at', p.created_at,
                 'updated_at', p.updated_at,
                 'segments', COALESCE((
                     SELECT jsonb_agg(jsonb_build_object(
                         'id', s.id,
                         'project_id', s.project_id,
                         'name', s.name,
                         'position', s.position,
                         'created_at', s.created_at,
                         'updated_at', s.updated_at,
                         'prompts', COALESCE((
                             SELECT jsonb_agg(jsonb_build_object(
                                 'id', pr.id,
                                 'segment_id', pr.segment_id,
                                 'title', pr.title,
                                 'body', pr.body,
                                 'language', pr.language,
                                 'kind', pr.kind,
                                 'position', pr.position,
                                 'created_at', pr.created_at,
                                 'updated_at', pr.updated_at,
                                 'validators', COALESCE((
                                     SELECT jsonb_agg(jsonb_build_object(
                                         'id', v.id,
                                         'prompt_id', v.prompt_id,
                                         'title', v.title,
                                         'body', v.body,
                                         'created_at', v.created_at,
                                         'updated_at', v.updated_at
                                     ) ORDER BY v.created_at)
                                     FROM validators v WHERE v.prompt_id = pr.id
                                 ), '[]'::jsonb)
                             ) ORDER BY pr.position, pr.created_at)
                             FROM prompts pr WHERE pr.segment_id = s.id
                         ), '[]'::jsonb)
                     ) ORDER BY s.position, s.created_at)
                     FROM segments s WHERE s.project_id = p.id
                 ), '[]'::jsonb)
             )
             FROM projects p
             WHERE p.id = $1 AND p.visibility = 'public'",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| Self::not_public(id))
    }

    fn not_public(id: Uuid) -> AppError {
        AppError::not_found("Project", Some(id)).with_message("Project not found or not public")
    }
}
