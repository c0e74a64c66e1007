//! Client entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ClientId, EmailAddress};

/// A client of the firm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all clients
    pub email: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Set for corporate clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: EmailAddress,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ClientId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone: None,
            address: None,
            company_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Company name for corporate clients, "First Last" otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.company_name {
            Some(company) if !company.trim().is_empty() => company.clone(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(
            "Mara",
            "Quist",
            EmailAddress::new("mara@quist.io").unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn individual_display_name() {
        assert_eq!(client().display_name(), "Mara Quist");
    }

    #[test]
    fn corporate_display_name() {
        assert_eq!(
            client().with_company("Quist Holdings").display_name(),
            "Quist Holdings"
        );
    }

    #[test]
    fn blank_company_falls_back_to_person() {
        assert_eq!(client().with_company("  ").display_name(), "Mara Quist");
    }
}
