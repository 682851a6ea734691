//! Handlers for the owner-scoped `/v1/segments` resource.
//!
//! Segments have no standalone read routes; they are read through the
//! public tree or the owning project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptrepo_db::models::segment::{CreateSegment, Segment, UpdateSegment};
use promptrepo_db::repositories::SegmentRepo;
use serde_json::Value as JsonValue;

use crate::error::ApiResult;
use crate::extract::{parse_uuid, ValidatedJson};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /v1/segments
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSegment>,
) -> ApiResult<(StatusCode, Json<DataResponse<Segment>>)> {
    let segment = SegmentRepo::create(&state.pool, user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(segment))))
}

/// PATCH /v1/segments/{id}
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateSegment>,
) -> ApiResult<Json<DataResponse<Segment>>> {
    let id = parse_uuid("segment", &id)?;
    let segment = SegmentRepo::update_owned(&state.pool, user.id, id, &input).await?;
    Ok(Json(DataResponse::new(segment)))
}

/// DELETE /v1/segments/{id}
pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<JsonValue>>> {
    let id = parse_uuid("segment", &id)?;
    SegmentRepo::delete_owned(&state.pool, user.id, id).await?;
    Ok(Json(DataResponse::new(JsonValue::Null)))
}
