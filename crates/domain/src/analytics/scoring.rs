//! Fixed-weight scoring formulas
//!
//! Risk score (outcome prediction):
//!
//! ```text
//! overdue * 30 + (age > 365d ? 50 : 0) + (100 - attorney success %) + (value > 1M ? 25 : 0)
//! ```
//!
//! Priority score (critical-case triage):
//!
//! ```text
//! overdue * 50 + (next deadline ? max(0, 7 - days away) * 10 : 0) + (value > 100k ? 25 : 0)
//! ```
//!
//! Performance score (attorney leaderboard):
//!
//! ```text
//! closed cases * 100 - overdue deadlines * 50
//! ```
//!
//! An absent estimated value never exceeds a threshold.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics;
use super::snapshot::CaseSnapshot;

/// Days ahead in which an incomplete deadline makes a case critical
pub const CRITICAL_WINDOW_DAYS: i64 = 7;

const OVERDUE_RISK_WEIGHT: f64 = 30.0;
const AGED_CASE_DAYS: i64 = 365;
const AGED_CASE_RISK: f64 = 50.0;
const HIGH_VALUE_RISK_THRESHOLD: i64 = 1_000_000;
const HIGH_VALUE_RISK: f64 = 25.0;

const OVERDUE_PRIORITY_WEIGHT: f64 = 50.0;
const PROXIMITY_PRIORITY_WEIGHT: f64 = 10.0;
const HIGH_VALUE_PRIORITY_THRESHOLD: i64 = 100_000;
const HIGH_VALUE_PRIORITY: f64 = 25.0;

const CLOSED_CASE_POINTS: i64 = 100;
const OVERDUE_DEADLINE_PENALTY: i64 = 50;

/// Predicted outcome of an open case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictedOutcome {
    LikelySuccess,
    ModerateRisk,
    HighRisk,
}

impl PredictedOutcome {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LikelySuccess => "Likely Success",
            Self::ModerateRisk => "Moderate Risk",
            Self::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for PredictedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs of the risk formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactors {
    pub overdue_count: usize,
    pub case_age_days: i64,
    /// 0-100
    pub attorney_success_rate: f64,
    pub estimated_value: Option<Decimal>,
}

#[must_use]
pub fn risk_score(factors: &RiskFactors) -> f64 {
    let aged = if factors.case_age_days > AGED_CASE_DAYS {
        AGED_CASE_RISK
    } else {
        0.0
    };
    let high_value = if exceeds(factors.estimated_value, HIGH_VALUE_RISK_THRESHOLD) {
        HIGH_VALUE_RISK
    } else {
        0.0
    };

    factors.overdue_count as f64 * OVERDUE_RISK_WEIGHT
        + aged
        + (100.0 - factors.attorney_success_rate)
        + high_value
}

/// Classify a case; the first matching rule wins
#[must_use]
pub fn predict_outcome(overdue_count: usize, attorney_success_rate: f64) -> PredictedOutcome {
    if overdue_count == 0 && attorney_success_rate > 80.0 {
        PredictedOutcome::LikelySuccess
    } else if overdue_count > 3 || attorney_success_rate < 50.0 {
        PredictedOutcome::HighRisk
    } else {
        PredictedOutcome::ModerateRisk
    }
}

/// Triage urgency of a case
///
/// `next_deadline_days_away` is `None` when nothing is due within the
/// critical window. An absent estimated value never crosses the threshold.
#[must_use]
pub fn priority_score(
    overdue_count: usize,
    next_deadline_days_away: Option<i64>,
    estimated_value: Option<Decimal>,
) -> f64 {
    let proximity = next_deadline_days_away.map_or(0.0, |days_away| {
        (CRITICAL_WINDOW_DAYS.saturating_sub(days_away)).max(0) as f64
            * PROXIMITY_PRIORITY_WEIGHT
    });
    let high_value = if exceeds(estimated_value, HIGH_VALUE_PRIORITY_THRESHOLD) {
        HIGH_VALUE_PRIORITY
    } else {
        0.0
    };

    overdue_count as f64 * OVERDUE_PRIORITY_WEIGHT + proximity + high_value
}

/// Leaderboard score: closed cases earn points, overdue deadlines cost them
///
/// Not floored at zero.
#[must_use]
pub fn performance_score(completed_cases: usize, overdue_deadlines: usize) -> i64 {
    completed_cases as i64 * CLOSED_CASE_POINTS - overdue_deadlines as i64 * OVERDUE_DEADLINE_PENALTY
}

/// At least one overdue deadline or one incomplete deadline due within
/// [`CRITICAL_WINDOW_DAYS`]
#[must_use]
pub fn is_critical(case: &CaseSnapshot, now: DateTime<Utc>) -> bool {
    metrics::overdue_count(case, now) > 0
        || !metrics::upcoming_within_days(case, now, CRITICAL_WINDOW_DAYS).is_empty()
}

/// A case with every derived metric and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCase {
    pub case_number: String,
    pub case_title: String,
    pub client_name: String,
    pub attorney_name: String,
    pub case_age_days: i64,
    pub overdue_count: usize,
    pub risk_score: f64,
    pub priority_score: f64,
    pub predicted_outcome: PredictedOutcome,
}

/// Score one case given its attorney's success rate
#[must_use]
pub fn score_case(case: &CaseSnapshot, attorney_success_rate: f64, now: DateTime<Utc>) -> ScoredCase {
    let overdue = metrics::overdue_count(case, now);
    let age = metrics::case_age_days(case, now);
    let next_days_away = metrics::next_upcoming(case, now, CRITICAL_WINDOW_DAYS)
        .map(|d| metrics::days_until(d.due_date, now));

    ScoredCase {
        case_number: case.case_number.clone(),
        case_title: case.case_title.clone(),
        client_name: case.client_label().to_string(),
        attorney_name: case.attorney_label().to_string(),
        case_age_days: age,
        overdue_count: overdue,
        risk_score: risk_score(&RiskFactors {
            overdue_count: overdue,
            case_age_days: age,
            attorney_success_rate,
            estimated_value: case.estimated_value,
        }),
        priority_score: priority_score(overdue, next_days_away, case.estimated_value),
        predicted_outcome: predict_outcome(overdue, attorney_success_rate),
    }
}

fn exceeds(value: Option<Decimal>, threshold: i64) -> bool {
    value.is_some_and(|v| v > Decimal::from(threshold))
}
