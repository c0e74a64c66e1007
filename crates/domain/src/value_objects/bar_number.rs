//! Bar registration number

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 20;

/// Bar registration number of an attorney
///
/// Stored uppercase; letters, digits and `-` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BarNumber(String);

impl BarNumber {
    /// Validate and normalise a bar number
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBarNumber`] when the value is too short,
    /// too long or contains characters other than ASCII alphanumerics and `-`.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let normalised = raw.trim().to_ascii_uppercase();

        if !(MIN_LEN..=MAX_LEN).contains(&normalised.len()) {
            return Err(DomainError::InvalidBarNumber(format!(
                "'{raw}' must be {MIN_LEN}-{MAX_LEN} characters"
            )));
        }
        if !normalised
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(DomainError::InvalidBarNumber(format!(
                "'{raw}' may only contain letters, digits and '-'"
            )));
        }

        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BarNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BarNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BarNumber> for String {
    fn from(bar: BarNumber) -> Self {
        bar.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_to_uppercase() {
        let bar = BarNumber::new(" ny-204518 ").unwrap();
        assert_eq!(bar.as_str(), "NY-204518");
    }

    #[test]
    fn rejects_short_values() {
        assert!(BarNumber::new("A1").is_err());
    }

    #[test]
    fn rejects_long_values() {
        assert!(BarNumber::new("X".repeat(21)).is_err());
    }

    #[test]
    fn rejects_punctuation() {
        let err = BarNumber::new("CA 1234/5").unwrap_err();
        assert!(matches!(err, DomainError::InvalidBarNumber(_)));
    }
}
