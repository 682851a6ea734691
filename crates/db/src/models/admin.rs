//! Admin read models: cross-owner project rows and usage counters.

use promptrepo_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::profile::Role;
use crate::models::project::Visibility;

/// A project row joined with its owner's summary, for the admin listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminProject {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_handle: String,
    pub owner_name: Option<String>,
    pub owner_role: Role,
}

/// Aggregate usage counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub projects: ProjectCounts,
    pub users: UserCounts,
    pub content: ContentCounts,
}

/// Project counters split by visibility. `private` is `total - public`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub public: i64,
    pub private: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCounts {
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentCounts {
    pub segments: i64,
    pub prompts: i64,
    pub validators: i64,
}
