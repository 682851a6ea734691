//! Handlers for the `/v1/admin` surface.
//!
//! The admin gate runs in the route group's middleware chain; these handlers
//! see only requests from admins and read across all owners.

use axum::extract::State;
use axum::Json;
use promptrepo_db::models::admin::{AdminProject, AdminStats};
use promptrepo_db::models::profile::Profile;
use promptrepo_db::repositories::AdminRepo;

use crate::error::ApiResult;
use crate::extract::ValidatedQuery;
use crate::query::{AdminProjectsQuery, PaginationQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /v1/admin/projects
///
/// All projects regardless of visibility, each row joined with an owner
/// summary, optionally filtered by owner and visibility.
pub async fn list_projects(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AdminProjectsQuery>,
) -> ApiResult<Json<DataResponse<Vec<AdminProject>>>> {
    let projects = AdminRepo::list_projects(
        &state.pool,
        query.limit,
        query.offset,
        query.owner_id,
        query.visibility,
    )
    .await?;
    Ok(Json(DataResponse::new(projects)))
}

/// GET /v1/admin/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<DataResponse<AdminStats>>> {
    let stats = AdminRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse::new(stats)))
}

/// GET /v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<PaginationQuery>,
) -> ApiResult<Json<DataResponse<Vec<Profile>>>> {
    let users = AdminRepo::list_users(&state.pool, page.limit, page.offset).await?;
    Ok(Json(DataResponse::new(users)))
}
