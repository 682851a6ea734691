//! Handlers for the anonymous `/v1/public` read surface.
//!
//! Everything here filters on `visibility = 'public'` in the repository;
//! private rows behave as absent.

use axum::extract::{Path, State};
use axum::Json;
use promptrepo_db::models::project::Project;
use promptrepo_db::models::prompt::Prompt;
use promptrepo_db::models::segment::Segment;
use promptrepo_db::repositories::PublicRepo;
use serde_json::Value as JsonValue;

use crate::error::ApiResult;
use crate::extract::{parse_uuid, ValidatedQuery};
use crate::query::PaginationQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /v1/public/projects
pub async fn list_projects(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<PaginationQuery>,
) -> ApiResult<Json<DataResponse<Vec<Project>>>> {
    let projects = PublicRepo::list_projects(&state.pool, page.limit, page.offset).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// GET /v1/public/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Project>>> {
    let id = parse_uuid("project", &id)?;
    let project = PublicRepo::find_project(&state.pool, id).await?;
    Ok(Json(DataResponse::new(project)))
}

/// GET /v1/public/projects/{id}/segments
pub async fn list_segments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<Segment>>>> {
    let id = parse_uuid("project", &id)?;
    let segments = PublicRepo::list_segments(&state.pool, id).await?;
    Ok(Json(DataResponse::new(segments)))
}

/// GET /v1/public/segments/{id}/prompts
pub async fn list_prompts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<Prompt>>>> {
    let id = parse_uuid("segment", &id)?;
    let prompts = PublicRepo::list_prompts(&state.pool, id).await?;
    Ok(Json(DataResponse::new(prompts)))
}

/// GET /v1/public/projects/{id}/hierarchy
///
/// One composed document: the project with its segments, their prompts and
/// their validators nested, assembled store-side.
pub async fn project_hierarchy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<JsonValue>>> {
    let id = parse_uuid("project", &id)?;
    let hierarchy = PublicRepo::project_hierarchy(&state.pool, id).await?;
    Ok(Json(DataResponse::new(hierarchy)))
}
