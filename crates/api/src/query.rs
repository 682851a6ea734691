//! Shared query parameter shapes for API handlers.

use promptrepo_core::types::EntityId;
use promptrepo_db::models::project::Visibility;
use promptrepo_db::models::DeclaredFields;
use serde::Deserialize;
use validator::Validate;

fn default_limit() -> i64 {
    20
}

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Out-of-range values are rejected rather than clamped, so callers notice
/// broken pagination instead of silently getting a different page.
#[derive(Debug, Deserialize, Validate)]
pub struct PaginationQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Offset must be zero or greater"))]
    pub offset: i64,
}

impl DeclaredFields for PaginationQuery {
    const FIELDS: &'static [&'static str] = &["limit", "offset"];
}

/// Filters for the admin project listing
/// (`?owner_id=&visibility=&limit=&offset=`).
#[derive(Debug, Deserialize, Validate)]
pub struct AdminProjectsQuery {
    pub owner_id: Option<EntityId>,
    pub visibility: Option<Visibility>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Offset must be zero or greater"))]
    pub offset: i64,
}

impl DeclaredFields for AdminProjectsQuery {
    const FIELDS: &'static [&'static str] = &["owner_id", "visibility", "limit", "offset"];
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
