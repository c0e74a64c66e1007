//! Report and dashboard handlers
//!
//! Every request reads a fresh snapshot of the practice; nothing is cached.

use axum::{
    Json,
    extract::{Query, State},
};
use domain::analytics::{
    AttorneyPerformance, CaseOutcomePrediction, CriticalCase, DashboardSummary,
    DeadlinePerformance, MonthlyTrend,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CriticalCasesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyTrendsQuery {
    /// Trailing months to include; all history when absent and unconfigured
    pub months: Option<u32>,
}

/// GET /api/reports/attorney-performance
#[instrument(skip(state))]
pub async fn attorney_performance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttorneyPerformance>>, ApiError> {
    Ok(Json(state.reports.attorney_performance().await?))
}

/// GET /api/reports/case-predictions
#[instrument(skip(state))]
pub async fn case_predictions(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseOutcomePrediction>>, ApiError> {
    Ok(Json(state.reports.case_predictions().await?))
}

/// GET /api/reports/critical-cases?limit=N
#[instrument(skip(state))]
pub async fn critical_cases(
    State(state): State<AppState>,
    Query(query): Query<CriticalCasesQuery>,
) -> Result<Json<Vec<CriticalCase>>, ApiError> {
    Ok(Json(state.reports.critical_cases(query.limit).await?))
}

/// GET /api/reports/monthly-trends?months=N
#[instrument(skip(state))]
pub async fn monthly_trends(
    State(state): State<AppState>,
    Query(query): Query<MonthlyTrendsQuery>,
) -> Result<Json<Vec<MonthlyTrend>>, ApiError> {
    Ok(Json(state.reports.monthly_trends(query.months).await?))
}

/// GET /api/reports/deadline-performance
#[instrument(skip(state))]
pub async fn deadline_performance(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeadlinePerformance>>, ApiError> {
    Ok(Json(state.reports.deadline_performance().await?))
}

/// GET /api/dashboard/summary
#[instrument(skip(state))]
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(state.reports.dashboard_summary().await?))
}
