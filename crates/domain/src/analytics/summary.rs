//! Headline figures for the dashboard

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metrics;
use super::scoring::{self, CRITICAL_WINDOW_DAYS};
use super::snapshot::{AttorneyAggregate, CaseSnapshot};
use crate::value_objects::CaseStatus;

/// Practice-wide counts shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_cases: usize,
    pub active_cases: usize,
    pub closed_cases: usize,
    pub total_clients: usize,
    pub active_attorneys: usize,
    /// Incomplete deadlines due between now and the critical window end
    pub upcoming_deadlines: usize,
    pub overdue_deadlines: usize,
    pub critical_cases: usize,
    /// Estimated value of every case that is not closed
    pub total_pipeline_value: Decimal,
}

/// Count cases, deadlines and pipeline value as of `now`
#[must_use]
pub fn summary(
    cases: &[CaseSnapshot],
    attorneys: &[AttorneyAggregate],
    client_count: usize,
    now: DateTime<Utc>,
) -> DashboardSummary {
    let open_cases = || cases.iter().filter(|c| !c.status.is_closed());

    DashboardSummary {
        total_cases: cases.len(),
        active_cases: cases.iter().filter(|c| c.status == CaseStatus::Active).count(),
        closed_cases: cases.iter().filter(|c| c.status.is_closed()).count(),
        total_clients: client_count,
        active_attorneys: attorneys.iter().filter(|a| a.is_active).count(),
        upcoming_deadlines: cases
            .iter()
            .map(|c| {
                metrics::upcoming_within_days(c, now, CRITICAL_WINDOW_DAYS)
                    .into_iter()
                    .filter(|d| d.due_date >= now)
                    .count()
            })
            .sum(),
        overdue_deadlines: cases.iter().map(|c| metrics::overdue_count(c, now)).sum(),
        critical_cases: open_cases().filter(|c| scoring::is_critical(c, now)).count(),
        total_pipeline_value: metrics::total_value(open_cases()),
    }
}
