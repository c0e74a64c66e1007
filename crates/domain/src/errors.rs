//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Invalid bar registration number
    #[error("Invalid bar number: {0}")]
    InvalidBarNumber(String),

    /// Invalid docket/case number
    #[error("Invalid case number: {0}")]
    InvalidCaseNumber(String),

    /// Status literal that does not map to a known case status
    #[error("Unknown case status: {0}")]
    UnknownCaseStatus(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A uniqueness or referential rule would be broken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Attorney", "123");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Attorney");
                assert_eq!(id, "123");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Case", "123");
        assert_eq!(err.to_string(), "Case not found: 123");
    }

    #[test]
    fn invalid_email_error_message() {
        let err = DomainError::InvalidEmailAddress("bad-email".to_string());
        assert_eq!(err.to_string(), "Invalid email address: bad-email");
    }

    #[test]
    fn invalid_bar_number_error_message() {
        let err = DomainError::InvalidBarNumber("??".to_string());
        assert_eq!(err.to_string(), "Invalid bar number: ??");
    }

    #[test]
    fn unknown_status_error_message() {
        let err = DomainError::UnknownCaseStatus("active".to_string());
        assert_eq!(err.to_string(), "Unknown case status: active");
    }

    #[test]
    fn conflict_error_message() {
        let err = DomainError::Conflict("bar number already registered".to_string());
        assert_eq!(err.to_string(), "Conflict: bar number already registered");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
