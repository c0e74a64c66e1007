//! Document persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{CaseId, Document, DocumentId};

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn insert(&self, document: &Document) -> Result<(), ApplicationError>;

    async fn update(&self, document: &Document) -> Result<(), ApplicationError>;

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;

    async fn list(&self) -> Result<Vec<Document>, ApplicationError>;

    async fn list_by_case(&self, case_id: &CaseId) -> Result<Vec<Document>, ApplicationError>;

    async fn delete(&self, id: &DocumentId) -> Result<(), ApplicationError>;

    /// Returns the number of removed documents
    async fn delete_by_case(&self, case_id: &CaseId) -> Result<usize, ApplicationError>;
}
