//! Case handlers

use application::{CaseChanges, NewCase};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Case, CaseId};
use tracing::{debug, instrument};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// GET /api/cases
#[instrument(skip(state))]
pub async fn list_cases(State(state): State<AppState>) -> Result<Json<Vec<Case>>, ApiError> {
    let cases = state.cases.list().await?;
    debug!(count = cases.len(), "Listed cases");
    Ok(Json(cases))
}

/// POST /api/cases
///
/// The client and attorney must exist (404 otherwise); the case number must
/// be unused (409). An unknown status literal is a 400.
#[instrument(skip(state, body), fields(case_number = %body.case_number))]
pub async fn create_case(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewCase>,
) -> Result<(StatusCode, Json<Case>), ApiError> {
    let case = state.cases.create(body).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

/// GET /api/cases/{id}
#[instrument(skip(state))]
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<CaseId>,
) -> Result<Json<Case>, ApiError> {
    Ok(Json(state.cases.get(&id).await?))
}

/// PUT /api/cases/{id}
#[instrument(skip(state, body))]
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<CaseId>,
    ValidatedJson(body): ValidatedJson<CaseChanges>,
) -> Result<Json<Case>, ApiError> {
    Ok(Json(state.cases.update(&id, body).await?))
}

/// DELETE /api/cases/{id}
///
/// Deadlines and documents of the case go with it.
#[instrument(skip(state))]
pub async fn delete_case(
    State(state): State<AppState>,
    Path(id): Path<CaseId>,
) -> Result<StatusCode, ApiError> {
    state.cases.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
