//! Court entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::CourtId;

/// A court in which cases are filed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub jurisdiction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form classification such as "District" or "Appellate"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Court {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        jurisdiction: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CourtId::new(),
            name: name.into(),
            jurisdiction: jurisdiction.into(),
            address: None,
            court_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_court_type(mut self, court_type: impl Into<String>) -> Self {
        self.court_type = Some(court_type.into());
        self
    }
}
