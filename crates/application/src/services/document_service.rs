//! Document Service - metadata of files filed against a case

use std::sync::Arc;

use domain::{CaseId, Document, DocumentId};
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApplicationError,
    ports::{CaseRepository, ClockPort, DocumentRepository},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDocument {
    pub case_id: CaseId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 100))]
    pub document_type: Option<String>,
    #[validate(length(max = 500))]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DocumentChanges {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    pub document_type: Option<String>,
    #[validate(length(max = 500))]
    pub file_path: Option<String>,
}

pub struct DocumentService {
    documents: Arc<dyn DocumentRepository>,
    cases: Arc<dyn CaseRepository>,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService").finish_non_exhaustive()
    }
}

impl DocumentService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        cases: Arc<dyn CaseRepository>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            documents,
            cases,
            clock,
        }
    }

    #[instrument(skip(self, input), fields(case_id = %input.case_id))]
    pub async fn create(&self, input: NewDocument) -> Result<Document, ApplicationError> {
        if self.cases.get(&input.case_id).await?.is_none() {
            return Err(ApplicationError::not_found("Case", input.case_id));
        }
        let mut document = Document::new(input.case_id, input.title, self.clock.now());
        document.document_type = input.document_type;
        document.file_path = input.file_path;

        self.documents.insert(&document).await?;
        info!(document_id = %document.id, "Recorded document");
        Ok(document)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &DocumentId) -> Result<Document, ApplicationError> {
        self.documents
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Document", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Document>, ApplicationError> {
        self.documents.list().await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &DocumentId,
        changes: DocumentChanges,
    ) -> Result<Document, ApplicationError> {
        let mut document = self.get(id).await?;
        if let Some(title) = changes.title {
            document.title = title;
        }
        if changes.document_type.is_some() {
            document.document_type = changes.document_type;
        }
        if changes.file_path.is_some() {
            document.file_path = changes.file_path;
        }
        document.updated_at = self.clock.now();
        self.documents.update(&document).await?;
        Ok(document)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &DocumentId) -> Result<(), ApplicationError> {
        self.get(id).await?;
        self.documents.delete(id).await
    }
}
