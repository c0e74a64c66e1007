//! Deadline handlers, including the per-case listings

use application::{DeadlineChanges, NewDeadline};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use domain::{CaseId, Deadline, DeadlineId};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Query of the upcoming-deadlines listing
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Window in days; the configured default when absent
    pub days: Option<i64>,
}

/// GET /api/deadlines
#[instrument(skip(state))]
pub async fn list_deadlines(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deadline>>, ApiError> {
    Ok(Json(state.deadlines.list().await?))
}

/// POST /api/deadlines
#[instrument(skip(state, body))]
pub async fn create_deadline(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<NewDeadline>,
) -> Result<(StatusCode, Json<Deadline>), ApiError> {
    let deadline = state.deadlines.create(body).await?;
    Ok((StatusCode::CREATED, Json(deadline)))
}

/// GET /api/deadlines/{id}
#[instrument(skip(state))]
pub async fn get_deadline(
    State(state): State<AppState>,
    Path(id): Path<DeadlineId>,
) -> Result<Json<Deadline>, ApiError> {
    Ok(Json(state.deadlines.get(&id).await?))
}

/// PUT /api/deadlines/{id}
///
/// `is_completed: true` stamps the completion date, `false` clears it.
#[instrument(skip(state, body))]
pub async fn update_deadline(
    State(state): State<AppState>,
    Path(id): Path<DeadlineId>,
    ValidatedJson(body): ValidatedJson<DeadlineChanges>,
) -> Result<Json<Deadline>, ApiError> {
    Ok(Json(state.deadlines.update(&id, body).await?))
}

/// DELETE /api/deadlines/{id}
#[instrument(skip(state))]
pub async fn delete_deadline(
    State(state): State<AppState>,
    Path(id): Path<DeadlineId>,
) -> Result<StatusCode, ApiError> {
    state.deadlines.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/deadlines/{id}/complete
#[instrument(skip(state))]
pub async fn complete_deadline(
    State(state): State<AppState>,
    Path(id): Path<DeadlineId>,
) -> Result<Json<Deadline>, ApiError> {
    Ok(Json(state.deadlines.complete(&id).await?))
}

/// GET /api/cases/{id}/deadlines
#[instrument(skip(state))]
pub async fn list_case_deadlines(
    State(state): State<AppState>,
    Path(case_id): Path<CaseId>,
) -> Result<Json<Vec<Deadline>>, ApiError> {
    Ok(Json(state.deadlines.list_for_case(&case_id).await?))
}

/// GET /api/cases/{id}/deadlines/upcoming?days=N
#[instrument(skip(state))]
pub async fn upcoming_case_deadlines(
    State(state): State<AppState>,
    Path(case_id): Path<CaseId>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<Deadline>>, ApiError> {
    let days = query
        .days
        .unwrap_or(state.reports.config().upcoming_default_days);
    let deadlines = state.deadlines.upcoming_for_case(&case_id, days).await?;
    debug!(count = deadlines.len(), days, "Listed upcoming deadlines");
    Ok(Json(deadlines))
}
