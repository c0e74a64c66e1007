//! Judge handlers

use application::{JudgeChanges, NewJudge};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Judge, JudgeId};
use tracing::instrument;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[instrument(skip(state))]
pub async fn list_judges(State(state): State<AppState>) -> Result<Json<Vec<Judge>>, ApiError> {
    Ok(Json(state.judges.list().await?))
}

/// 404 when `court_id` names no court
#[instrument(skip(state, body))]
pub async fn create_judge(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewJudge>,
) -> Result<(StatusCode, Json<Judge>), ApiError> {
    let judge = state.judges.create(body).await?;
    Ok((StatusCode::CREATED, Json(judge)))
}

#[instrument(skip(state))]
pub async fn get_judge(
    State(state): State<AppState>,
    Path(id): Path<JudgeId>,
) -> Result<Json<Judge>, ApiError> {
    Ok(Json(state.judges.get(&id).await?))
}

#[instrument(skip(state, body))]
pub async fn update_judge(
    State(state): State<AppState>,
    Path(id): Path<JudgeId>,
    ValidatedJson(body): ValidatedJson<JudgeChanges>,
) -> Result<Json<Judge>, ApiError> {
    Ok(Json(state.judges.update(&id, body).await?))
}

/// 409 while a case is heard by the judge
#[instrument(skip(state))]
pub async fn delete_judge(
    State(state): State<AppState>,
    Path(id): Path<JudgeId>,
) -> Result<StatusCode, ApiError> {
    state.judges.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
