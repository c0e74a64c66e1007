//! Judge entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CourtId, JudgeId};

/// A judge who may preside over cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    pub id: JudgeId,
    pub first_name: String,
    pub last_name: String,
    /// Court the judge sits on, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<CourtId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Judge {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: JudgeId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            court_id: None,
            appointed_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn with_court(mut self, court_id: CourtId) -> Self {
        self.court_id = Some(court_id);
        self
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Hon. {} {}", self.first_name, self.last_name)
    }
}
