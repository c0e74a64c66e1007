//! Court persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{Court, CourtId};

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourtRepository: Send + Sync {
    async fn insert(&self, court: &Court) -> Result<(), ApplicationError>;

    async fn update(&self, court: &Court) -> Result<(), ApplicationError>;

    async fn get(&self, id: &CourtId) -> Result<Option<Court>, ApplicationError>;

    async fn list(&self) -> Result<Vec<Court>, ApplicationError>;

    async fn delete(&self, id: &CourtId) -> Result<(), ApplicationError>;
}
