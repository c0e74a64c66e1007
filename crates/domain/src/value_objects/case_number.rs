//! Docket number of a case

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const MAX_LEN: usize = 50;

/// Court docket number, e.g. `CV-2024-00117`
///
/// Letters, digits and the separators `-`, `/`, `.` and `:` are accepted.
/// Uniqueness is checked case-insensitively, so the number is kept uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseNumber(String);

impl CaseNumber {
    /// Validate and normalise a case number
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCaseNumber`] for empty, overlong or
    /// otherwise malformed numbers.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let normalised = raw.trim().to_ascii_uppercase();

        if normalised.is_empty() {
            return Err(DomainError::InvalidCaseNumber("empty case number".into()));
        }
        if normalised.len() > MAX_LEN {
            return Err(DomainError::InvalidCaseNumber(format!(
                "'{raw}' exceeds {MAX_LEN} characters"
            )));
        }
        if !normalised
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '.' | ':'))
        {
            return Err(DomainError::InvalidCaseNumber(format!(
                "'{raw}' contains unsupported characters"
            )));
        }

        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CaseNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CaseNumber> for String {
    fn from(number: CaseNumber) -> Self {
        number.0
    }
}
