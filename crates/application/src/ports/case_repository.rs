//! Case persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{AttorneyId, Case, CaseId, CaseNumber, ClientId, CourtId, JudgeId};

use crate::error::ApplicationError;

/// Which cases to return from [`CaseRepository::list_where`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFilter {
    Client(ClientId),
    Attorney(AttorneyId),
    Court(CourtId),
    Judge(JudgeId),
}

/// Port for case storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn insert(&self, case: &Case) -> Result<(), ApplicationError>;

    async fn update(&self, case: &Case) -> Result<(), ApplicationError>;

    async fn get(&self, id: &CaseId) -> Result<Option<Case>, ApplicationError>;

    /// All cases in insertion order
    async fn list(&self) -> Result<Vec<Case>, ApplicationError>;

    /// Cases referencing the given party, in insertion order
    async fn list_where(&self, filter: CaseFilter) -> Result<Vec<Case>, ApplicationError>;

    /// Delete the case only; deadlines and documents are removed by the caller
    async fn delete(&self, id: &CaseId) -> Result<(), ApplicationError>;

    async fn find_by_case_number(
        &self,
        case_number: &CaseNumber,
    ) -> Result<Option<Case>, ApplicationError>;
}
