//! Report records handed to the reporting consumer

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scoring::PredictedOutcome;
use crate::value_objects::CaseStatus;

/// Literal reported for a critical case with nothing due in the window
pub const NO_UPCOMING_DEADLINES: &str = "No upcoming deadlines";

/// One row of the attorney leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAttorney {
    /// 1-based position after sorting by revenue
    pub rank: usize,
    pub attorney_name: String,
    pub bar_number: String,
    /// Sum of estimated values over all assigned cases
    pub total_revenue: Decimal,
    pub avg_case_value: Decimal,
    /// Closed cases
    pub completed_cases: usize,
    pub active_cases: usize,
    pub overdue_deadlines: usize,
    /// Closed cases over assigned cases, in percent
    pub completion_rate_percent: Decimal,
    pub performance_score: i64,
}

/// Leaderboard row under its report name
pub type AttorneyPerformance = ScoredAttorney;

/// Predicted outcome of an active or open case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOutcomePrediction {
    pub case_number: String,
    pub case_title: String,
    pub client_name: String,
    pub attorney_name: String,
    pub status: CaseStatus,
    /// Days since filing; negative for a future filing date
    pub case_age_days: i64,
    pub overdue_deadlines: usize,
    /// Closed share of the attorney's cases, in percent
    pub attorney_success_rate: f64,
    pub estimated_value: Option<Decimal>,
    pub risk_score: f64,
    pub predicted_outcome: PredictedOutcome,
}

/// A case needing attention, with its nearest upcoming deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalCase {
    pub case_number: String,
    pub case_title: String,
    pub client_name: String,
    pub attorney_name: String,
    pub status: CaseStatus,
    /// Overdue deadlines over the life of the case
    pub overdue_deadlines: usize,
    /// Description of the nearest upcoming deadline, or [`NO_UPCOMING_DEADLINES`]
    pub next_deadline: String,
    pub next_deadline_date: Option<DateTime<Utc>>,
    /// Whole days until `next_deadline_date`
    pub days_until_deadline: Option<i64>,
    pub estimated_value: Option<Decimal>,
    pub priority_score: f64,
}

/// Cases filed in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    /// `YYYY-MM`
    pub period: String,
    pub new_cases: usize,
    pub total_revenue: Decimal,
    /// Mean estimated value, absent values counting as zero
    pub avg_case_value: Decimal,
}

/// How a case's deadlines were met
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlinePerformance {
    pub case_number: String,
    pub case_title: String,
    pub total_deadlines: usize,
    /// Completed on or before the due date
    pub completed_on_time: usize,
    pub completed_late: usize,
    /// Incomplete and not yet due
    pub still_pending: usize,
    pub overdue: usize,
    /// On-time share of all deadlines; 0.0 without deadlines
    pub on_time_percentage: f64,
}
