//! Repository for the `profiles` table.

use promptrepo_core::error::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::map_db_error;
use crate::models::profile::Role;

/// Role lookups for bearer-token resolution.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Resolve the stored role for a user id.
    ///
    /// A missing profile row resolves to [`Role::User`] rather than an
    /// error; a transport failure is surfaced so the caller can decide how
    /// to degrade.
    pub async fn find_role(pool: &PgPool, user_id: Uuid) -> AppResult<Role> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)?;
        Ok(role.unwrap_or(Role::User))
    }
}
