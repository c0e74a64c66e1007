//! Per-case and per-attorney counts derived from a snapshot
//!
//! Every function that depends on the current time takes `now` explicitly.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::snapshot::{CaseSnapshot, DeadlineSnapshot};
use crate::entities::Deadline;

/// Whole days between filing and `now`, truncated toward zero
///
/// Negative when the filing date lies in the future.
#[must_use]
pub fn case_age_days(case: &CaseSnapshot, now: DateTime<Utc>) -> i64 {
    (now - case.filing_date).num_days()
}

/// Incomplete deadlines whose due date has passed
#[must_use]
pub fn overdue_count(case: &CaseSnapshot, now: DateTime<Utc>) -> usize {
    case.deadlines.iter().filter(|d| d.is_overdue(now)).count()
}

#[must_use]
pub fn completed_count(case: &CaseSnapshot) -> usize {
    case.deadlines.iter().filter(|d| d.is_completed).count()
}

/// Share of completed deadlines, in percent
///
/// A case without deadlines counts as fully complete (100.0).
#[must_use]
pub fn completion_rate(case: &CaseSnapshot) -> f64 {
    let total = case.deadlines.len();
    if total == 0 {
        return 100.0;
    }
    percentage(completed_count(case), total)
}

/// A dated obligation that can fall inside an upcoming window
pub trait Due {
    fn due_at(&self) -> DateTime<Utc>;
    fn is_done(&self) -> bool;
}

impl Due for DeadlineSnapshot {
    fn due_at(&self) -> DateTime<Utc> {
        self.due_date
    }

    fn is_done(&self) -> bool {
        self.is_completed
    }
}

impl Due for Deadline {
    fn due_at(&self) -> DateTime<Utc> {
        self.due_date
    }

    fn is_done(&self) -> bool {
        self.is_completed
    }
}

/// Incomplete items due on or before `now + days`, earliest first
///
/// Overdue items are included. Equal due dates keep input order.
#[must_use]
pub fn due_within<T: Due>(items: &[T], now: DateTime<Utc>, days: i64) -> Vec<&T> {
    let horizon = horizon(now, days);
    let mut upcoming: Vec<&T> = items
        .iter()
        .filter(|d| !d.is_done() && d.due_at() <= horizon)
        .collect();
    upcoming.sort_by_key(|d| d.due_at());
    upcoming
}

/// [`due_within`] over the deadlines of a case
#[must_use]
pub fn upcoming_within_days(
    case: &CaseSnapshot,
    now: DateTime<Utc>,
    days: i64,
) -> Vec<&DeadlineSnapshot> {
    due_within(&case.deadlines, now, days)
}

/// Nearest incomplete deadline due between `now` and `now + days`
#[must_use]
pub fn next_upcoming(
    case: &CaseSnapshot,
    now: DateTime<Utc>,
    days: i64,
) -> Option<&DeadlineSnapshot> {
    upcoming_within_days(case, now, days)
        .into_iter()
        .find(|d| d.due_date >= now)
}

/// Whole days from `now` until `due`, truncated toward zero
#[must_use]
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (due - now).num_days()
}

/// Closed cases over all cases, in percent; 0.0 for an attorney without cases
#[must_use]
pub fn success_rate(closed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    percentage(closed, total)
}

/// Success rate over the given cases
#[must_use]
pub fn attorney_success_rate<'a>(cases: impl IntoIterator<Item = &'a CaseSnapshot>) -> f64 {
    let (closed, total) = cases.into_iter().fold((0, 0), |(closed, total), case| {
        (closed + usize::from(case.status.is_closed()), total + 1)
    });
    success_rate(closed, total)
}

/// Sum of estimated values, absent ones counting as zero
///
/// Saturates at the `Decimal` bounds instead of overflowing.
#[must_use]
pub fn total_value<'a>(cases: impl IntoIterator<Item = &'a CaseSnapshot>) -> Decimal {
    cases
        .into_iter()
        .map(CaseSnapshot::value_or_zero)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}

fn horizon(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|offset| now.checked_add_signed(offset))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::value_objects::CaseStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn deadline(offset_days: i64, completed: bool) -> DeadlineSnapshot {
        DeadlineSnapshot {
            due_date: now() + Duration::days(offset_days),
            is_completed: completed,
            completed_date: completed.then(now),
            is_critical: false,
            description: Some(format!("due {offset_days:+}")),
        }
    }

    fn case_with(deadlines: Vec<DeadlineSnapshot>) -> CaseSnapshot {
        CaseSnapshot {
            case_number: "CV-1".into(),
            case_title: "Test".into(),
            filing_date: now() - Duration::days(10),
            status: CaseStatus::Active,
            estimated_value: None,
            client_name: None,
            attorney_id: None,
            attorney_name: None,
            deadlines,
        }
    }

    #[test]
    fn age_truncates_partial_days() {
        let mut case = case_with(vec![]);
        case.filing_date = now() - Duration::hours(47);
        assert_eq!(case_age_days(&case, now()), 1);
    }

    #[test]
    fn age_is_negative_for_future_filing() {
        let mut case = case_with(vec![]);
        case.filing_date = now() + Duration::days(3);
        assert_eq!(case_age_days(&case, now()), -3);
    }

    #[test]
    fn overdue_ignores_completed_and_future() {
        let case = case_with(vec![
            deadline(-5, false),
            deadline(-2, true),
            deadline(3, false),
            deadline(-1, false),
        ]);
        assert_eq!(overdue_count(&case, now()), 2);
        assert_eq!(completed_count(&case), 1);
    }

    #[test]
    fn completion_rate_of_empty_case_is_full() {
        let case = case_with(vec![]);
        assert!((completion_rate(&case) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn completion_rate_counts_completed_share() {
        let case = case_with(vec![
            deadline(-1, true),
            deadline(1, false),
            deadline(2, false),
            deadline(3, true),
        ]);
        assert!((completion_rate(&case) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn upcoming_includes_overdue_and_sorts_by_due_date() {
        let case = case_with(vec![
            deadline(6, false),
            deadline(-3, false),
            deadline(9, false),
            deadline(1, true),
            deadline(2, false),
        ]);
        let due: Vec<_> = upcoming_within_days(&case, now(), 7)
            .iter()
            .map(|d| d.due_date)
            .collect();
        assert_eq!(
            due,
            vec![
                now() - Duration::days(3),
                now() + Duration::days(2),
                now() + Duration::days(6),
            ]
        );
    }

    #[test]
    fn upcoming_sort_is_stable_for_equal_due_dates() {
        let mut first = deadline(2, false);
        first.description = Some("first".into());
        let mut second = deadline(2, false);
        second.description = Some("second".into());
        let case = case_with(vec![deadline(4, false), first, second]);
        let upcoming = upcoming_within_days(&case, now(), 7);
        assert_eq!(upcoming[0].description.as_deref(), Some("first"));
        assert_eq!(upcoming[1].description.as_deref(), Some("second"));
    }

    #[test]
    fn upcoming_window_is_inclusive() {
        let case = case_with(vec![deadline(7, false)]);
        assert_eq!(upcoming_within_days(&case, now(), 7).len(), 1);
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let case = case_with(vec![deadline(400, false)]);
        assert_eq!(upcoming_within_days(&case, now(), i64::MAX).len(), 1);
    }

    #[test]
    fn next_upcoming_skips_overdue() {
        let case = case_with(vec![deadline(-1, false), deadline(4, false)]);
        let next = next_upcoming(&case, now(), 7).unwrap();
        assert_eq!(next.due_date, now() + Duration::days(4));

        let only_overdue = case_with(vec![deadline(-1, false)]);
        assert!(next_upcoming(&only_overdue, now(), 7).is_none());
    }

    #[test]
    fn success_rate_without_cases_is_zero() {
        assert!(success_rate(0, 0).abs() < f64::EPSILON);
        assert!((success_rate(3, 4) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn attorney_success_rate_counts_closed() {
        let mut closed = case_with(vec![]);
        closed.status = CaseStatus::Closed;
        let open = case_with(vec![]);
        let cases = [closed, open];
        assert!((attorney_success_rate(&cases) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn days_until_truncates() {
        let due = now() + Duration::hours(71);
        assert_eq!(days_until(due, now()), 2);
    }

    #[test]
    fn total_value_treats_absent_as_zero_and_saturates() {
        let mut valued = case_with(vec![]);
        valued.estimated_value = Some(Decimal::from(250));
        let unvalued = case_with(vec![]);
        assert_eq!(total_value([&valued, &unvalued]), Decimal::from(250));

        let mut huge = case_with(vec![]);
        huge.estimated_value = Some(Decimal::MAX);
        assert_eq!(total_value([&huge, &valued, &huge]), Decimal::MAX);
    }

    #[test]
    fn entity_and_snapshot_windows_agree() {
        use crate::value_objects::CaseId;

        let case_id = CaseId::new();
        let offsets = [6, -2, 30, 2, 2];
        let entities: Vec<Deadline> = offsets
            .iter()
            .map(|&days| {
                Deadline::new(case_id, format!("{days:+}"), now() + Duration::days(days), now())
            })
            .collect();
        let snapshot = case_with(entities.iter().map(DeadlineSnapshot::from).collect());

        let from_entities: Vec<_> = due_within(&entities, now(), 7)
            .into_iter()
            .map(|d| d.due_date)
            .collect();
        let from_snapshot: Vec<_> = upcoming_within_days(&snapshot, now(), 7)
            .into_iter()
            .map(|d| d.due_date)
            .collect();
        assert_eq!(from_entities, from_snapshot);
        assert_eq!(from_entities.len(), 4);
        assert_eq!(due_within(&entities, now(), i64::MAX).len(), 5);
    }
}
