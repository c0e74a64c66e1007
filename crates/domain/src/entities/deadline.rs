//! Deadline entity - dated obligations attached to a case

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CaseId, DeadlineId};

/// A court or internal deadline on a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: DeadlineId,
    pub case_id: CaseId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    /// Set when the deadline is completed. Imported data may lack it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    /// Missing a critical deadline jeopardises the case
    pub is_critical: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deadline {
    #[must_use]
    pub fn new(
        case_id: CaseId,
        title: impl Into<String>,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DeadlineId::new(),
            case_id,
            title: title.into(),
            description: None,
            due_date,
            is_completed: false,
            completed_date: None,
            is_critical: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Incomplete and past due at `now`
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date < now
    }

    /// Mark the deadline done at `completed_at`
    pub fn complete(&mut self, completed_at: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_date = Some(completed_at);
        self.updated_at = completed_at;
    }

    /// Reopen a completed deadline
    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.is_completed = false;
        self.completed_date = None;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn overdue_only_when_incomplete_and_past() {
        let now = Utc::now();
        let mut d = Deadline::new(CaseId::new(), "Answer", now - Duration::days(1), now);
        assert!(d.is_overdue(now));
        d.complete(now);
        assert!(!d.is_overdue(now));
    }

    #[test]
    fn due_exactly_now_is_not_overdue() {
        let now = Utc::now();
        let d = Deadline::new(CaseId::new(), "Answer", now, now);
        assert!(!d.is_overdue(now));
    }

    #[test]
    fn reopen_clears_completion() {
        let now = Utc::now();
        let mut d = Deadline::new(CaseId::new(), "Brief", now, now);
        d.complete(now);
        d.reopen(now);
        assert!(!d.is_completed);
        assert!(d.completed_date.is_none());
    }
}
