//! Cases table

use application::{
    error::ApplicationError,
    ports::{CaseFilter, CaseRepository},
};
use async_trait::async_trait;
use domain::{Case, CaseId, CaseNumber};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{CASE_COLUMNS, decimal_opt, row_to_case, ts, ts_opt},
};

/// Column and bound value for a [`CaseFilter`]
fn filter_clause(filter: CaseFilter) -> (&'static str, String) {
    match filter {
        CaseFilter::Client(id) => ("client_id", id.to_string()),
        CaseFilter::Attorney(id) => ("attorney_id", id.to_string()),
        CaseFilter::Court(id) => ("court_id", id.to_string()),
        CaseFilter::Judge(id) => ("judge_id", id.to_string()),
    }
}

#[async_trait]
impl CaseRepository for SqlitePracticeStore {
    #[instrument(skip(self, case), fields(case_id = %case.id))]
    async fn insert(&self, case: &Case) -> Result<(), ApplicationError> {
        let c = case.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO cases (
                    id, case_number, title, description, status, case_type,
                    filing_date, closed_date, estimated_value, client_id, attorney_id,
                    court_id, judge_id, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    c.id.to_string(),
                    c.case_number.as_str(),
                    c.title,
                    c.description,
                    c.status.as_str(),
                    c.case_type,
                    ts(c.filing_date),
                    ts_opt(c.closed_date),
                    decimal_opt(c.estimated_value),
                    c.client_id.to_string(),
                    c.attorney_id.to_string(),
                    c.court_id.map(|id| id.to_string()),
                    c.judge_id.map(|id| id.to_string()),
                    ts(c.created_at),
                    ts(c.updated_at),
                ],
            )?;
            debug!("Saved case");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, case), fields(case_id = %case.id))]
    async fn update(&self, case: &Case) -> Result<(), ApplicationError> {
        let c = case.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE cases SET
                    case_number = ?1, title = ?2, description = ?3, status = ?4,
                    case_type = ?5, filing_date = ?6, closed_date = ?7, estimated_value = ?8,
                    client_id = ?9, attorney_id = ?10, court_id = ?11, judge_id = ?12,
                    updated_at = ?13
                 WHERE id = ?14",
                params![
                    c.case_number.as_str(),
                    c.title,
                    c.description,
                    c.status.as_str(),
                    c.case_type,
                    ts(c.filing_date),
                    ts_opt(c.closed_date),
                    decimal_opt(c.estimated_value),
                    c.client_id.to_string(),
                    c.attorney_id.to_string(),
                    c.court_id.map(|id| id.to_string()),
                    c.judge_id.map(|id| id.to_string()),
                    ts(c.updated_at),
                    c.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Case", c.id)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn get(&self, id: &CaseId) -> Result<Option<Case>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let case = conn
                .query_row(
                    &format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1"),
                    [&id],
                    row_to_case,
                )
                .optional()?;
            Ok(case)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Case>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY seq"))?;
            let cases = stmt
                .query_map([], row_to_case)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(count = cases.len(), "Fetched cases");
            Ok(cases)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_where(&self, filter: CaseFilter) -> Result<Vec<Case>, ApplicationError> {
        let (column, value) = filter_clause(filter);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CASE_COLUMNS} FROM cases WHERE {column} = ?1 ORDER BY seq"
            ))?;
            let cases = stmt
                .query_map([&value], row_to_case)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(cases)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn delete(&self, id: &CaseId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM cases WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Case", id)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_case_number(
        &self,
        case_number: &CaseNumber,
    ) -> Result<Option<Case>, ApplicationError> {
        let number = case_number.as_str().to_string();
        self.with_conn(move |conn| {
            let case = conn
                .query_row(
                    &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_number = ?1"),
                    [&number],
                    row_to_case,
                )
                .optional()?;
            Ok(case)
        })
        .await
    }
}
