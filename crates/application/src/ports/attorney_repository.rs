//! Attorney persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{Attorney, AttorneyId, BarNumber, EmailAddress};

use crate::error::ApplicationError;

/// Port for attorney storage
///
/// Uniqueness of bar number and email is checked by the service through the
/// `find_by_*` lookups; stores may enforce it again.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AttorneyRepository: Send + Sync {
    async fn insert(&self, attorney: &Attorney) -> Result<(), ApplicationError>;

    async fn update(&self, attorney: &Attorney) -> Result<(), ApplicationError>;

    async fn get(&self, id: &AttorneyId) -> Result<Option<Attorney>, ApplicationError>;

    /// All attorneys in insertion order
    async fn list(&self) -> Result<Vec<Attorney>, ApplicationError>;

    async fn delete(&self, id: &AttorneyId) -> Result<(), ApplicationError>;

    async fn find_by_bar_number(
        &self,
        bar_number: &BarNumber,
    ) -> Result<Option<Attorney>, ApplicationError>;

    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<Attorney>, ApplicationError>;
}
