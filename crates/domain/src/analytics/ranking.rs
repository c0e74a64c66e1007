//! Report views: scoring, filtering and ordering of snapshots
//!
//! Each view is a map-then-filter pipeline over individual records, so a
//! case with unresolved references still yields a row (with placeholder
//! names) instead of failing the whole report. All orderings are stable.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use super::metrics;
use super::reports::{
    AttorneyPerformance, CaseOutcomePrediction, CriticalCase, DeadlinePerformance, MonthlyTrend,
    NO_UPCOMING_DEADLINES, ScoredAttorney,
};
use super::scoring::{self, CRITICAL_WINDOW_DAYS};
use super::snapshot::{AttorneyAggregate, CaseSnapshot};
use crate::value_objects::{AttorneyId, CaseStatus};

const DECIMAL_PLACES: u32 = 2;

/// Active attorneys ranked by total estimated value of their cases
#[must_use]
pub fn attorney_leaderboard(
    attorneys: &[AttorneyAggregate],
    now: DateTime<Utc>,
) -> Vec<AttorneyPerformance> {
    let mut rows: Vec<ScoredAttorney> = attorneys
        .iter()
        .filter(|a| a.is_active)
        .map(|a| score_attorney(a, now))
        .collect();

    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }
    rows
}

fn score_attorney(attorney: &AttorneyAggregate, now: DateTime<Utc>) -> ScoredAttorney {
    let cases = &attorney.cases_assigned;
    let case_count = cases.len();
    let total_revenue = metrics::total_value(cases);
    let completed_cases = count_status(cases, CaseStatus::Closed);
    let active_cases = count_status(cases, CaseStatus::Active);
    let overdue_deadlines = cases.iter().map(|c| metrics::overdue_count(c, now)).sum();

    let (avg_case_value, completion_rate_percent) = if case_count == 0 {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let count = Decimal::from(case_count);
        (
            (total_revenue / count).round_dp(DECIMAL_PLACES),
            (Decimal::from(completed_cases) / count * Decimal::ONE_HUNDRED)
                .round_dp(DECIMAL_PLACES),
        )
    };

    ScoredAttorney {
        rank: 0,
        attorney_name: attorney.display_name.clone(),
        bar_number: attorney.bar_number.clone(),
        total_revenue,
        avg_case_value,
        completed_cases,
        active_cases,
        overdue_deadlines,
        completion_rate_percent,
        performance_score: scoring::performance_score(completed_cases, overdue_deadlines),
    }
}

fn count_status(cases: &[CaseSnapshot], status: CaseStatus) -> usize {
    cases.iter().filter(|c| c.status == status).count()
}

/// Success rate of every attorney over all cases in the snapshot
fn success_rates(cases: &[CaseSnapshot]) -> HashMap<AttorneyId, f64> {
    let mut by_attorney: HashMap<AttorneyId, Vec<&CaseSnapshot>> = HashMap::new();
    for case in cases {
        if let Some(id) = case.attorney_id {
            by_attorney.entry(id).or_default().push(case);
        }
    }
    by_attorney
        .into_iter()
        .map(|(id, cases)| (id, metrics::attorney_success_rate(cases)))
        .collect()
}

/// Active and open cases, riskiest first
#[must_use]
pub fn case_outcome_predictions(
    cases: &[CaseSnapshot],
    now: DateTime<Utc>,
) -> Vec<CaseOutcomePrediction> {
    let rates = success_rates(cases);

    let mut predictions: Vec<CaseOutcomePrediction> = cases
        .iter()
        .filter(|c| c.status.is_open_for_prediction())
        .map(|case| {
            // a case without a resolvable attorney has a 0% success rate
            let rate = case
                .attorney_id
                .and_then(|id| rates.get(&id).copied())
                .unwrap_or(0.0);
            let scored = scoring::score_case(case, rate, now);
            CaseOutcomePrediction {
                case_number: scored.case_number,
                case_title: scored.case_title,
                client_name: scored.client_name,
                attorney_name: scored.attorney_name,
                status: case.status,
                case_age_days: scored.case_age_days,
                overdue_deadlines: scored.overdue_count,
                attorney_success_rate: rate,
                estimated_value: case.estimated_value,
                risk_score: scored.risk_score,
                predicted_outcome: scored.predicted_outcome,
            }
        })
        .collect();

    predictions.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    predictions
}

/// Non-closed cases needing attention, most urgent first
///
/// `limit` keeps only the top entries after sorting.
#[must_use]
pub fn critical_cases(
    cases: &[CaseSnapshot],
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Vec<CriticalCase> {
    let mut critical: Vec<CriticalCase> = cases
        .iter()
        .filter(|c| !c.status.is_closed() && scoring::is_critical(c, now))
        .map(|case| {
            let overdue = metrics::overdue_count(case, now);
            let next = metrics::next_upcoming(case, now, CRITICAL_WINDOW_DAYS);
            let days_away = next.map(|d| metrics::days_until(d.due_date, now));

            CriticalCase {
                case_number: case.case_number.clone(),
                case_title: case.case_title.clone(),
                client_name: case.client_label().to_string(),
                attorney_name: case.attorney_label().to_string(),
                status: case.status,
                overdue_deadlines: overdue,
                next_deadline: next
                    .and_then(|d| d.description.clone())
                    .unwrap_or_else(|| NO_UPCOMING_DEADLINES.to_string()),
                next_deadline_date: next.map(|d| d.due_date),
                days_until_deadline: days_away,
                estimated_value: case.estimated_value,
                priority_score: scoring::priority_score(overdue, days_away, case.estimated_value),
            }
        })
        .collect();

    critical.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    if let Some(limit) = limit {
        critical.truncate(limit);
    }
    critical
}

/// New cases and value per filing month, oldest month first
///
/// With `months = Some(n)` only the current month and the `n - 1` before
/// it are considered.
#[must_use]
pub fn monthly_trends(
    cases: &[CaseSnapshot],
    now: DateTime<Utc>,
    months: Option<u32>,
) -> Vec<MonthlyTrend> {
    let earliest = months.map(|n| first_month_of_window(now, n));

    let mut groups: BTreeMap<(i32, u32), Vec<&CaseSnapshot>> = BTreeMap::new();
    for case in cases {
        let period = (case.filing_date.year(), case.filing_date.month());
        if earliest.is_some_and(|first| period < first) {
            continue;
        }
        groups.entry(period).or_default().push(case);
    }

    groups
        .into_iter()
        .map(|((year, month), cases)| {
            // absent estimated values count as zero in both sum and mean
            let total_revenue = metrics::total_value(cases.iter().copied());
            let avg_case_value =
                (total_revenue / Decimal::from(cases.len())).round_dp(DECIMAL_PLACES);
            MonthlyTrend {
                year,
                month,
                period: format!("{year:04}-{month:02}"),
                new_cases: cases.len(),
                total_revenue,
                avg_case_value,
            }
        })
        .collect()
}

/// (year, month) of the first month inside an `n`-month window ending at `now`.
/// A zero-month window starts after the current month and admits nothing.
fn first_month_of_window(now: DateTime<Utc>, months: u32) -> (i32, u32) {
    let current = i64::from(now.year()) * 12 + i64::from(now.month0());
    let first = current - i64::from(months) + 1;
    (first.div_euclid(12) as i32, first.rem_euclid(12) as u32 + 1)
}

/// On-time delivery per case, best first
#[must_use]
pub fn deadline_performance(
    cases: &[CaseSnapshot],
    now: DateTime<Utc>,
) -> Vec<DeadlinePerformance> {
    let mut rows: Vec<DeadlinePerformance> = cases
        .iter()
        .map(|case| {
            let mut row = DeadlinePerformance {
                case_number: case.case_number.clone(),
                case_title: case.case_title.clone(),
                total_deadlines: case.deadlines.len(),
                completed_on_time: 0,
                completed_late: 0,
                still_pending: 0,
                overdue: 0,
                on_time_percentage: 0.0,
            };
            for d in &case.deadlines {
                match (d.is_completed, d.completed_date) {
                    (true, Some(done)) if done <= d.due_date => row.completed_on_time += 1,
                    (true, Some(_)) => row.completed_late += 1,
                    // completed without a completion date lands in neither bucket
                    (true, None) => {},
                    (false, _) if d.due_date >= now => row.still_pending += 1,
                    (false, _) => row.overdue += 1,
                }
            }
            if row.total_deadlines > 0 {
                row.on_time_percentage =
                    row.completed_on_time as f64 / row.total_deadlines as f64 * 100.0;
            }
            row
        })
        .collect();

    rows.sort_by(|a, b| b.on_time_percentage.total_cmp(&a.on_time_percentage));
    rows
}
