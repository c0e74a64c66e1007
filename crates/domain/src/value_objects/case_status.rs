//! Case status value object
//!
//! Statuses travel over the API and through storage as their exact
//! literal names. Matching is case-sensitive: `"active"` is rejected
//! rather than silently mapped to `Active`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Lifecycle state of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CaseStatus {
    /// Being actively litigated
    #[default]
    Active,
    /// Opened but not yet assigned a litigation track
    Open,
    /// Waiting on an external decision
    Pending,
    /// Concluded
    Closed,
    /// Parked by the firm
    OnHold,
}

impl CaseStatus {
    /// Exact literal used in storage and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Open => "Open",
            Self::Pending => "Pending",
            Self::Closed => "Closed",
            Self::OnHold => "OnHold",
        }
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Whether outcome predictions are produced for cases in this state
    #[must_use]
    pub const fn is_open_for_prediction(&self) -> bool {
        matches!(self, Self::Active | Self::Open)
    }

    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Active,
            Self::Open,
            Self::Pending,
            Self::Closed,
            Self::OnHold,
        ]
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCaseStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_roundtrip() {
        for status in CaseStatus::all() {
            assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("active".parse::<CaseStatus>().is_err());
        assert!("CLOSED".parse::<CaseStatus>().is_err());
        assert!("On Hold".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn prediction_candidates() {
        assert!(CaseStatus::Active.is_open_for_prediction());
        assert!(CaseStatus::Open.is_open_for_prediction());
        assert!(!CaseStatus::Pending.is_open_for_prediction());
        assert!(!CaseStatus::Closed.is_open_for_prediction());
        assert!(!CaseStatus::OnHold.is_open_for_prediction());
    }

    #[test]
    fn serializes_as_literal() {
        assert_eq!(
            serde_json::to_string(&CaseStatus::OnHold).unwrap(),
            r#""OnHold""#
        );
        let parsed: CaseStatus = serde_json::from_str(r#""Closed""#).unwrap();
        assert_eq!(parsed, CaseStatus::Closed);
        assert!(serde_json::from_str::<CaseStatus>(r#""closed""#).is_err());
    }
}
