//! Documents table

use application::{error::ApplicationError, ports::DocumentRepository};
use async_trait::async_trait;
use domain::{CaseId, Document, DocumentId};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{DOCUMENT_COLUMNS, row_to_document, ts},
};

#[async_trait]
impl DocumentRepository for SqlitePracticeStore {
    #[instrument(skip(self, document), fields(document_id = %document.id))]
    async fn insert(&self, document: &Document) -> Result<(), ApplicationError> {
        let d = document.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO documents (
                    id, case_id, title, document_type, file_path, uploaded_at,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    d.id.to_string(),
                    d.case_id.to_string(),
                    d.title,
                    d.document_type,
                    d.file_path,
                    ts(d.uploaded_at),
                    ts(d.created_at),
                    ts(d.updated_at),
                ],
            )?;
            debug!("Saved document");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, document), fields(document_id = %document.id))]
    async fn update(&self, document: &Document) -> Result<(), ApplicationError> {
        let d = document.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE documents SET
                    title = ?1, document_type = ?2, file_path = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![
                    d.title,
                    d.document_type,
                    d.file_path,
                    ts(d.updated_at),
                    d.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Document", d.id)
        })
        .await
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let document = conn
                .query_row(
                    &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"),
                    [&id],
                    row_to_document,
                )
                .optional()?;
            Ok(document)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Document>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY seq"))?;
            let documents = stmt
                .query_map([], row_to_document)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(documents)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %case_id))]
    async fn list_by_case(&self, case_id: &CaseId) -> Result<Vec<Document>, ApplicationError> {
        let case_id = case_id.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE case_id = ?1 ORDER BY seq"
            ))?;
            let documents = stmt
                .query_map([&case_id], row_to_document)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(documents)
        })
        .await
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn delete(&self, id: &DocumentId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM documents WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Document", id)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %case_id))]
    async fn delete_by_case(&self, case_id: &CaseId) -> Result<usize, ApplicationError> {
        let case_id = case_id.to_string();
        self.with_conn(move |conn| {
            let deleted = conn.execute("DELETE FROM documents WHERE case_id = ?1", [&case_id])?;
            debug!(deleted, "Deleted case documents");
            Ok(deleted)
        })
        .await
    }
}
