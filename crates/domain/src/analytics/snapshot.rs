//! Read-only views of stored entities used by one reporting pass

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{Attorney, Case, Client, Deadline};
use crate::value_objects::{AttorneyId, CaseStatus};

/// Placeholder shown when a case's client or attorney cannot be resolved
pub const UNKNOWN_PARTY: &str = "Unknown";

/// A deadline as seen by the analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineSnapshot {
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub is_critical: bool,
    pub description: Option<String>,
}

impl DeadlineSnapshot {
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date < now
    }
}

impl From<&Deadline> for DeadlineSnapshot {
    fn from(deadline: &Deadline) -> Self {
        Self {
            due_date: deadline.due_date,
            is_completed: deadline.is_completed,
            completed_date: deadline.completed_date,
            is_critical: deadline.is_critical,
            // Fall back to the title
            description: deadline
                .description
                .clone()
                .or_else(|| Some(deadline.title.clone())),
        }
    }
}

/// A case joined with its client, attorney and deadlines
///
/// `client_name` / `attorney_name` are `None` when the reference could not
/// be resolved; reports render them as [`UNKNOWN_PARTY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub case_number: String,
    pub case_title: String,
    pub filing_date: DateTime<Utc>,
    pub status: CaseStatus,
    pub estimated_value: Option<Decimal>,
    pub client_name: Option<String>,
    pub attorney_id: Option<AttorneyId>,
    pub attorney_name: Option<String>,
    /// In storage order; metrics that sort them do so stably
    pub deadlines: Vec<DeadlineSnapshot>,
}

impl CaseSnapshot {
    /// Join a case with whatever related records could be found
    #[must_use]
    pub fn assemble<'a>(
        case: &Case,
        client: Option<&Client>,
        attorney: Option<&Attorney>,
        deadlines: impl IntoIterator<Item = &'a Deadline>,
    ) -> Self {
        Self {
            case_number: case.case_number.to_string(),
            case_title: case.title.clone(),
            filing_date: case.filing_date,
            status: case.status,
            estimated_value: case.estimated_value,
            client_name: client.map(Client::display_name),
            attorney_id: Some(case.attorney_id),
            attorney_name: attorney.map(Attorney::display_name),
            deadlines: deadlines.into_iter().map(DeadlineSnapshot::from).collect(),
        }
    }

    pub fn client_label(&self) -> &str {
        label_or_unknown(self.client_name.as_deref())
    }

    pub fn attorney_label(&self) -> &str {
        label_or_unknown(self.attorney_name.as_deref())
    }

    /// Estimated value for sums and averages; absent counts as zero
    #[must_use]
    pub fn value_or_zero(&self) -> Decimal {
        self.estimated_value.unwrap_or(Decimal::ZERO)
    }
}

fn label_or_unknown(name: Option<&str>) -> &str {
    match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => UNKNOWN_PARTY,
    }
}

/// An attorney with every case assigned to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttorneyAggregate {
    pub attorney_id: AttorneyId,
    pub display_name: String,
    pub bar_number: String,
    pub email: String,
    pub is_active: bool,
    pub cases_assigned: Vec<CaseSnapshot>,
}

impl AttorneyAggregate {
    #[must_use]
    pub fn new(attorney: &Attorney, cases_assigned: Vec<CaseSnapshot>) -> Self {
        Self {
            attorney_id: attorney.id,
            display_name: attorney.display_name(),
            bar_number: attorney.bar_number.to_string(),
            email: attorney.email.to_string(),
            is_active: attorney.is_active,
            cases_assigned,
        }
    }
}
