//! Property-based tests for the analytics core and value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::analytics::{
    self, CaseSnapshot, DeadlineSnapshot, metrics,
    scoring::{self, RiskFactors},
};
use domain::value_objects::{BarNumber, CaseStatus, EmailAddress};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn arb_status() -> impl Strategy<Value = CaseStatus> {
    prop::sample::select(CaseStatus::all().to_vec())
}

fn arb_deadline() -> impl Strategy<Value = DeadlineSnapshot> {
    (-60i64..60, any::<bool>(), prop::option::of(-5i64..5)).prop_map(
        |(due_offset, completed, completed_delta)| {
            let due_date = now() + Duration::days(due_offset);
            DeadlineSnapshot {
                due_date,
                is_completed: completed,
                completed_date: if completed {
                    completed_delta.map(|d| due_date + Duration::days(d))
                } else {
                    None
                },
                is_critical: false,
                description: None,
            }
        },
    )
}

fn arb_case() -> impl Strategy<Value = CaseSnapshot> {
    (
        0i64..900,
        arb_status(),
        prop::option::of(0i64..3_000_000),
        prop::collection::vec(arb_deadline(), 0..8),
    )
        .prop_map(|(age, status, value, deadlines)| CaseSnapshot {
            case_number: format!("CV-{age}"),
            case_title: "Generated".into(),
            filing_date: now() - Duration::days(age),
            status,
            estimated_value: value.map(Decimal::from),
            client_name: None,
            attorney_id: None,
            attorney_name: None,
            deadlines,
        })
}

// ============================================================================
// Scoring Property Tests
// ============================================================================

mod scoring_tests {
    use super::*;

    proptest! {
        #[test]
        fn each_overdue_deadline_adds_thirty_risk(
            overdue in 0usize..50,
            age in -100i64..2000,
            rate in 0.0f64..=100.0,
            value in prop::option::of(0i64..5_000_000),
        ) {
            let base = RiskFactors {
                overdue_count: overdue,
                case_age_days: age,
                attorney_success_rate: rate,
                estimated_value: value.map(Decimal::from),
            };
            let more = RiskFactors { overdue_count: overdue + 1, ..base };
            let delta = scoring::risk_score(&more) - scoring::risk_score(&base);
            prop_assert!((delta - 30.0).abs() < 1e-9);
        }

        #[test]
        fn priority_never_negative(
            overdue in 0usize..20,
            days_away in prop::option::of(-30i64..365),
            value in prop::option::of(0i64..5_000_000),
        ) {
            let score = scoring::priority_score(overdue, days_away, value.map(Decimal::from));
            prop_assert!(score >= 0.0);
        }

        #[test]
        fn performance_is_linear(completed in 0usize..1000, overdue in 0usize..1000) {
            let score = scoring::performance_score(completed, overdue);
            prop_assert_eq!(score, completed as i64 * 100 - overdue as i64 * 50);
        }
    }
}

// ============================================================================
// Metric Property Tests
// ============================================================================

mod metric_tests {
    use super::*;

    proptest! {
        #[test]
        fn completion_rate_is_a_percentage(case in arb_case()) {
            let rate = metrics::completion_rate(&case);
            prop_assert!((0.0..=100.0).contains(&rate));
        }

        #[test]
        fn upcoming_is_sorted_and_incomplete(case in arb_case(), days in 0i64..30) {
            let upcoming = metrics::upcoming_within_days(&case, now(), days);
            prop_assert!(upcoming.windows(2).all(|w| w[0].due_date <= w[1].due_date));
            prop_assert!(upcoming.iter().all(|d| !d.is_completed));
        }

        #[test]
        fn overdue_plus_completed_never_exceeds_total(case in arb_case()) {
            let overdue = metrics::overdue_count(&case, now());
            let completed = metrics::completed_count(&case);
            prop_assert!(overdue + completed <= case.deadlines.len());
        }
    }
}

// ============================================================================
// Report Property Tests
// ============================================================================

mod report_tests {
    use super::*;

    proptest! {
        #[test]
        fn monthly_trend_periods_strictly_ascending(
            cases in prop::collection::vec(arb_case(), 0..30),
        ) {
            let trends = analytics::monthly_trends(&cases, now(), None);
            prop_assert!(trends.windows(2).all(|w| w[0].period < w[1].period));
            let total: usize = trends.iter().map(|t| t.new_cases).sum();
            prop_assert_eq!(total, cases.len());
        }

        #[test]
        fn critical_cases_are_open_and_sorted(
            cases in prop::collection::vec(arb_case(), 0..30),
            limit in prop::option::of(0usize..10),
        ) {
            let critical = analytics::critical_cases(&cases, now(), limit);
            prop_assert!(critical.iter().all(|c| c.status != CaseStatus::Closed));
            prop_assert!(critical.windows(2).all(|w| w[0].priority_score >= w[1].priority_score));
            if let Some(limit) = limit {
                prop_assert!(critical.len() <= limit);
            }
        }

        #[test]
        fn predictions_only_for_active_or_open(
            cases in prop::collection::vec(arb_case(), 0..30),
        ) {
            let predictions = analytics::case_outcome_predictions(&cases, now());
            prop_assert!(predictions.iter().all(|p| p.status.is_open_for_prediction()));
            prop_assert!(predictions.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
        }

        #[test]
        fn deadline_buckets_account_for_dated_deadlines(case in arb_case()) {
            let rows = analytics::deadline_performance(std::slice::from_ref(&case), now());
            let row = &rows[0];
            let undated = case
                .deadlines
                .iter()
                .filter(|d| d.is_completed && d.completed_date.is_none())
                .count();
            prop_assert_eq!(
                row.completed_on_time + row.completed_late + row.still_pending + row.overdue + undated,
                row.total_deadlines
            );
            prop_assert!((0.0..=100.0).contains(&row.on_time_percentage));
        }
    }
}

// ============================================================================
// Value Object Property Tests
// ============================================================================

mod value_object_tests {
    use super::*;

    proptest! {
        #[test]
        fn status_literal_roundtrips(status in arb_status()) {
            let parsed: CaseStatus = status.as_str().parse().unwrap();
            prop_assert_eq!(parsed, status);
        }

        #[test]
        fn lowercase_status_rejected(status in arb_status()) {
            let lower = status.as_str().to_lowercase();
            prop_assert!(lower.parse::<CaseStatus>().is_err());
        }

        #[test]
        fn bar_number_is_uppercased(s in "[a-z]{2}-[0-9]{3,8}") {
            let bar = BarNumber::new(s.clone()).unwrap();
            prop_assert_eq!(bar.as_str(), s.to_uppercase());
        }

        #[test]
        fn email_is_normalised(local in "[a-z]{1,10}", domain in "[a-z]{2,10}") {
            let raw = format!("  {}@{}.COM ", local.to_uppercase(), domain);
            let email = EmailAddress::new(raw).unwrap();
            prop_assert_eq!(email.as_str(), format!("{local}@{domain}.com"));
        }
    }
}
