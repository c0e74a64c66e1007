//! Document entity - files attached to a case

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CaseId, DocumentId};

/// Metadata of a document filed under a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub case_id: CaseId,
    pub title: String,
    /// e.g. "Pleading", "Motion", "Exhibit"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    #[must_use]
    pub fn new(case_id: CaseId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: DocumentId::new(),
            case_id,
            title: title.into(),
            document_type: None,
            file_path: None,
            uploaded_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }
}
