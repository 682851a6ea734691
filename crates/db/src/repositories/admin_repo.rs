//! Read-only repository for the admin surface: cross-owner listings and
//! aggregate counters.

use promptrepo_core::error::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::admin::{AdminProject, AdminStats, ContentCounts, ProjectCounts, UserCounts};
use crate::models::profile::Profile;
use crate::models::project::Visibility;

/// Admin queries span all owners; role enforcement happens upstream.
pub struct AdminRepo;

impl AdminRepo {
    /// Page through every project regardless of visibility, newest first,
    /// with the owner's summary joined in. Both filters are optional.
    pub async fn list_projects(
        pool: &PgPool,
        limit: i64,
        offset: i64,
        owner_id: Option<Uuid>,
        visibility: Option<Visibility>,
    ) -> AppResult<Vec<AdminProject>> {
        sqlx::query_as::<_, AdminProject>(
            "SELECT p.id, p.owner_id, p.name, p.description, p.visibility,
                    p.created_at, p.updated_at,
                    pr.handle AS owner_handle, pr.name AS owner_name, pr.role AS owner_role
             FROM projects p
             JOIN profiles pr ON pr.id = p.owner_id
             WHERE ($3::uuid IS NULL OR p.owner_id = $3)
               AND ($4::visibility IS NULL OR p.visibility = $4)
             ORDER BY p.created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .bind(owner_id)
        .bind(visibility)
        .fetch_all(pool)
        .await
        .map_err(map_db_error)
    }

    /// Aggregate usage counters in a single round trip.
    pub async fn stats(pool: &PgPool) -> AppResult<AdminStats> {
        let (projects_total, projects_public, users_total, segments, prompts, validators) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64)>(
                "SELECT
                     (SELECT COUNT(*) FROM projects),
                     (SELECT COUNT(*) FROM projects WHERE visibility = 'public'),
                     (SELECT COUNT(*) FROM profiles),
                     (SELECT COUNT(*) FROM segments),
                     (SELECT COUNT(*) FROM prompts),
                     (SELECT COUNT(*) FROM validators)",
            )
            .fetch_one(pool)
            .await
            .map_err(map_db_error)?;
        Ok(AdminStats {
            projects: ProjectCounts {
                total: projects_total,
                public: projects_public,
                private: projects_total - projects_public,
            },
            users: UserCounts { total: users_total },
            content: ContentCounts {
                segments,
                prompts,
                validators,
            },
        })
    }

    /// Page through profiles, newest first.
    pub async fn list_users(pool: &PgPool, limit: i64, offset: i64) -> AppResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, handle, name, role, stripe_customer_id, theme_pref,
                    created_at, updated_at
             FROM profiles
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(map_db_error)
    }
}
