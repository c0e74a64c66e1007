//! Contact email address for attorneys and clients
//!
//! Emails take part in uniqueness checks, so they are normalised
//! (trimmed, lowercased) before they are compared or stored.
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("  J.Smith@Firm.Law ").unwrap();
//! assert_eq!(email.as_str(), "j.smith@firm.law");
//! assert!(EmailAddress::new("no-at-sign").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated, normalised email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Validate and normalise an email address
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmailAddress`] if the format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let raw = email.into();
        let candidate = Self {
            value: raw.trim().to_lowercase(),
        };
        candidate
            .validate()
            .map_err(|_| DomainError::InvalidEmailAddress(raw))?;
        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Domain part (after @), used by fixtures to group people by firm
    pub fn domain(&self) -> &str {
        self.value.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.value
    }
}
