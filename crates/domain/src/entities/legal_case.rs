//! Case entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{AttorneyId, CaseId, CaseNumber, CaseStatus, ClientId, CourtId, JudgeId};

/// A matter handled by the firm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    /// Unique across all cases
    pub case_number: CaseNumber,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    pub filing_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_date: Option<DateTime<Utc>>,
    /// Expected recovery or fee value; absent when not yet estimated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<Decimal>,
    pub client_id: ClientId,
    pub attorney_id: AttorneyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<CourtId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_id: Option<JudgeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Open a new active case filed at `now`
    #[must_use]
    pub fn new(
        case_number: CaseNumber,
        title: impl Into<String>,
        client_id: ClientId,
        attorney_id: AttorneyId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CaseId::new(),
            case_number,
            title: title.into(),
            description: None,
            status: CaseStatus::Active,
            case_type: None,
            filing_date: now,
            closed_date: None,
            estimated_value: None,
            client_id,
            attorney_id,
            court_id: None,
            judge_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn with_filing_date(mut self, filing_date: DateTime<Utc>) -> Self {
        self.filing_date = filing_date;
        self
    }

    #[must_use]
    pub const fn with_estimated_value(mut self, value: Decimal) -> Self {
        self.estimated_value = Some(value);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_case_type(mut self, case_type: impl Into<String>) -> Self {
        self.case_type = Some(case_type.into());
        self
    }

    #[must_use]
    pub const fn with_court(mut self, court_id: CourtId, judge_id: Option<JudgeId>) -> Self {
        self.court_id = Some(court_id);
        self.judge_id = judge_id;
        self
    }

    /// Move the case to `status`, stamping or clearing the closed date
    pub fn transition_to(&mut self, status: CaseStatus, now: DateTime<Utc>) {
        if status.is_closed() && !self.status.is_closed() {
            self.closed_date = Some(now);
        } else if !status.is_closed() {
            self.closed_date = None;
        }
        self.status = status;
        self.updated_at = now;
    }
}
