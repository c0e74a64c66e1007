//! Attorney entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{AttorneyId, BarNumber, EmailAddress};

/// An attorney employed by the firm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attorney {
    pub id: AttorneyId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all attorneys
    pub bar_number: BarNumber,
    /// Unique across all attorneys
    pub email: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    pub hire_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// Inactive attorneys keep their history but drop off the leaderboard
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attorney {
    /// Create an active attorney hired on `now`'s date
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        bar_number: BarNumber,
        email: EmailAddress,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AttorneyId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            bar_number,
            email,
            phone: None,
            specialization: None,
            hire_date: now.date_naive(),
            hourly_rate: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    #[must_use]
    pub const fn with_hire_date(mut self, hire_date: NaiveDate) -> Self {
        self.hire_date = hire_date;
        self
    }

    #[must_use]
    pub const fn with_hourly_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    /// "First Last", as shown on reports
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
