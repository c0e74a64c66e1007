//! Deadline persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{CaseId, Deadline, DeadlineId};

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeadlineRepository: Send + Sync {
    async fn insert(&self, deadline: &Deadline) -> Result<(), ApplicationError>;

    async fn update(&self, deadline: &Deadline) -> Result<(), ApplicationError>;

    async fn get(&self, id: &DeadlineId) -> Result<Option<Deadline>, ApplicationError>;

    async fn list(&self) -> Result<Vec<Deadline>, ApplicationError>;

    /// Deadlines of one case in insertion order
    async fn list_by_case(&self, case_id: &CaseId) -> Result<Vec<Deadline>, ApplicationError>;

    async fn delete(&self, id: &DeadlineId) -> Result<(), ApplicationError>;

    /// Returns the number of removed deadlines
    async fn delete_by_case(&self, case_id: &CaseId) -> Result<usize, ApplicationError>;
}
