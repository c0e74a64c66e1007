//! Attorney handlers

use application::{AttorneyChanges, NewAttorney};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Attorney, AttorneyId};
use tracing::{debug, instrument};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// GET /api/attorneys
#[instrument(skip(state))]
pub async fn list_attorneys(State(state): State<AppState>) -> Result<Json<Vec<Attorney>>, ApiError> {
    let attorneys = state.attorneys.list().await?;
    debug!(count = attorneys.len(), "Listed attorneys");
    Ok(Json(attorneys))
}

/// POST /api/attorneys
///
/// 409 when the bar number or email is already registered.
#[instrument(skip(state, body))]
pub async fn create_attorney(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewAttorney>,
) -> Result<(StatusCode, Json<Attorney>), ApiError> {
    let attorney = state.attorneys.create(body).await?;
    Ok((StatusCode::CREATED, Json(attorney)))
}

/// GET /api/attorneys/{id}
#[instrument(skip(state))]
pub async fn get_attorney(
    State(state): State<AppState>,
    Path(id): Path<AttorneyId>,
) -> Result<Json<Attorney>, ApiError> {
    Ok(Json(state.attorneys.get(&id).await?))
}

/// PUT /api/attorneys/{id}
///
/// Fields left out of the body keep their stored value.
#[instrument(skip(state, body))]
pub async fn update_attorney(
    State(state): State<AppState>,
    Path(id): Path<AttorneyId>,
    ValidatedJson(body): ValidatedJson<AttorneyChanges>,
) -> Result<Json<Attorney>, ApiError> {
    Ok(Json(state.attorneys.update(&id, body).await?))
}

/// DELETE /api/attorneys/{id}
#[instrument(skip(state))]
pub async fn delete_attorney(
    State(state): State<AppState>,
    Path(id): Path<AttorneyId>,
) -> Result<StatusCode, ApiError> {
    state.attorneys.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
