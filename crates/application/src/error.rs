//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (validation of values and literals)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness or referential rule would be broken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage adapter failure
    #[error("Repository error: {0}")]
    Repository(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Missing entity of the given kind
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }

    /// Whether the caller can fix the request and retry
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::NotFound(_) | Self::Conflict(_)
        )
    }
}
