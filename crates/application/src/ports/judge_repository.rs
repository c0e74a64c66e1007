//! Judge persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{CourtId, Judge, JudgeId};

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait JudgeRepository: Send + Sync {
    async fn insert(&self, judge: &Judge) -> Result<(), ApplicationError>;

    async fn update(&self, judge: &Judge) -> Result<(), ApplicationError>;

    async fn get(&self, id: &JudgeId) -> Result<Option<Judge>, ApplicationError>;

    async fn list(&self) -> Result<Vec<Judge>, ApplicationError>;

    async fn delete(&self, id: &JudgeId) -> Result<(), ApplicationError>;

    /// Judges sitting on the given court
    async fn list_by_court(&self, court_id: &CourtId) -> Result<Vec<Judge>, ApplicationError>;
}
