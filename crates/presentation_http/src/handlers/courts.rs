//! Court handlers

use application::{CourtChanges, NewCourt};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Court, CourtId};
use tracing::instrument;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[instrument(skip(state))]
pub async fn list_courts(State(state): State<AppState>) -> Result<Json<Vec<Court>>, ApiError> {
    Ok(Json(state.courts.list().await?))
}

#[instrument(skip(state, body))]
pub async fn create_court(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewCourt>,
) -> Result<(StatusCode, Json<Court>), ApiError> {
    let court = state.courts.create(body).await?;
    Ok((StatusCode::CREATED, Json(court)))
}

#[instrument(skip(state))]
pub async fn get_court(
    State(state): State<AppState>,
    Path(id): Path<CourtId>,
) -> Result<Json<Court>, ApiError> {
    Ok(Json(state.courts.get(&id).await?))
}

#[instrument(skip(state, body))]
pub async fn update_court(
    State(state): State<AppState>,
    Path(id): Path<CourtId>,
    ValidatedJson(body): ValidatedJson<CourtChanges>,
) -> Result<Json<Court>, ApiError> {
    Ok(Json(state.courts.update(&id, body).await?))
}

#[instrument(skip(state))]
pub async fn delete_court(
    State(state): State<AppState>,
    Path(id): Path<CourtId>,
) -> Result<StatusCode, ApiError> {
    state.courts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
