//! Handlers for the owner-scoped `/v1/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptrepo_db::models::project::{CreateProject, Project, UpdateProject};
use promptrepo_db::repositories::ProjectRepo;
use serde_json::Value as JsonValue;

use crate::error::ApiResult;
use crate::extract::{parse_uuid, ValidatedJson};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /v1/projects
pub async fn list(
    user: CurrentUser,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_owned(&state.pool, user.id).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// POST /v1/projects
///
/// The owner is always the caller; any `owner_id` in the body is ignored.
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> ApiResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = ProjectRepo::create(&state.pool, user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}

/// GET /v1/projects/{id}
pub async fn get_by_id(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Project>>> {
    let id = parse_uuid("project", &id)?;
    let project = ProjectRepo::find_owned(&state.pool, user.id, id).await?;
    Ok(Json(DataResponse::new(project)))
}

/// PATCH /v1/projects/{id}
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> ApiResult<Json<DataResponse<Project>>> {
    let id = parse_uuid("project", &id)?;
    let project = ProjectRepo::update_owned(&state.pool, user.id, id, &input).await?;
    Ok(Json(DataResponse::new(project)))
}

/// DELETE /v1/projects/{id}
pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<JsonValue>>> {
    let id = parse_uuid("project", &id)?;
    ProjectRepo::delete_owned(&state.pool, user.id, id).await?;
    Ok(Json(DataResponse::new(JsonValue::Null)))
}
