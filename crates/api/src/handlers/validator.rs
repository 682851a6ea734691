//! Handlers for the owner-scoped `/v1/validators` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptrepo_db::models::validator::{CreateValidator, UpdateValidator, Validator};
use promptrepo_db::repositories::ValidatorRepo;
use serde_json::Value as JsonValue;

use crate::error::ApiResult;
use crate::extract::{parse_uuid, ValidatedJson};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /v1/validators
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateValidator>,
) -> ApiResult<(StatusCode, Json<DataResponse<Validator>>)> {
    let validator = ValidatorRepo::create(&state.pool, user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(validator))))
}

/// PATCH /v1/validators/{id}
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateValidator>,
) -> ApiResult<Json<DataResponse<Validator>>> {
    let id = parse_uuid("validator", &id)?;
    let validator = ValidatorRepo::update_owned(&state.pool, user.id, id, &input).await?;
    Ok(Json(DataResponse::new(validator)))
}

/// DELETE /v1/validators/{id}
pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<JsonValue>>> {
    let id = parse_uuid("validator", &id)?;
    ValidatorRepo::delete_owned(&state.pool, user.id, id).await?;
    Ok(Json(DataResponse::new(JsonValue::Null)))
}
