//! Handlers for the owner-scoped `/v1/prompts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptrepo_db::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};
use promptrepo_db::repositories::PromptRepo;
use serde_json::Value as JsonValue;

use crate::error::ApiResult;
use crate::extract::{parse_uuid, ValidatedJson};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /v1/prompts
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePrompt>,
) -> ApiResult<(StatusCode, Json<DataResponse<Prompt>>)> {
    let prompt = PromptRepo::create(&state.pool, user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(prompt))))
}

/// PATCH /v1/prompts/{id}
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdatePrompt>,
) -> ApiResult<Json<DataResponse<Prompt>>> {
    let id = parse_uuid("prompt", &id)?;
    let prompt = PromptRepo::update_owned(&state.pool, user.id, id, &input).await?;
    Ok(Json(DataResponse::new(prompt)))
}

/// DELETE /v1/prompts/{id}
pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<JsonValue>>> {
    let id = parse_uuid("prompt", &id)?;
    PromptRepo::delete_owned(&state.pool, user.id, id).await?;
    Ok(Json(DataResponse::new(JsonValue::Null)))
}
