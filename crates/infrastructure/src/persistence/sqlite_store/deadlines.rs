//! Deadlines table

use application::{error::ApplicationError, ports::DeadlineRepository};
use async_trait::async_trait;
use domain::{CaseId, Deadline, DeadlineId};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{DEADLINE_COLUMNS, row_to_deadline, ts, ts_opt},
};

#[async_trait]
impl DeadlineRepository for SqlitePracticeStore {
    #[instrument(skip(self, deadline), fields(deadline_id = %deadline.id))]
    async fn insert(&self, deadline: &Deadline) -> Result<(), ApplicationError> {
        let d = deadline.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO deadlines (
                    id, case_id, title, description, due_date, is_completed,
                    completed_date, is_critical, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    d.id.to_string(),
                    d.case_id.to_string(),
                    d.title,
                    d.description,
                    ts(d.due_date),
                    d.is_completed,
                    ts_opt(d.completed_date),
                    d.is_critical,
                    ts(d.created_at),
                    ts(d.updated_at),
                ],
            )?;
            debug!("Saved deadline");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, deadline), fields(deadline_id = %deadline.id))]
    async fn update(&self, deadline: &Deadline) -> Result<(), ApplicationError> {
        let d = deadline.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE deadlines SET
                    title = ?1, description = ?2, due_date = ?3, is_completed = ?4,
                    completed_date = ?5, is_critical = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![
                    d.title,
                    d.description,
                    ts(d.due_date),
                    d.is_completed,
                    ts_opt(d.completed_date),
                    d.is_critical,
                    ts(d.updated_at),
                    d.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Deadline", d.id)
        })
        .await
    }

    #[instrument(skip(self), fields(deadline_id = %id))]
    async fn get(&self, id: &DeadlineId) -> Result<Option<Deadline>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let deadline = conn
                .query_row(
                    &format!("SELECT {DEADLINE_COLUMNS} FROM deadlines WHERE id = ?1"),
                    [&id],
                    row_to_deadline,
                )
                .optional()?;
            Ok(deadline)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Deadline>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {DEADLINE_COLUMNS} FROM deadlines ORDER BY seq"))?;
            let deadlines = stmt
                .query_map([], row_to_deadline)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(deadlines)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %case_id))]
    async fn list_by_case(&self, case_id: &CaseId) -> Result<Vec<Deadline>, ApplicationError> {
        let case_id = case_id.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DEADLINE_COLUMNS} FROM deadlines WHERE case_id = ?1 ORDER BY seq"
            ))?;
            let deadlines = stmt
                .query_map([&case_id], row_to_deadline)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(deadlines)
        })
        .await
    }

    #[instrument(skip(self), fields(deadline_id = %id))]
    async fn delete(&self, id: &DeadlineId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM deadlines WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Deadline", id)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %case_id))]
    async fn delete_by_case(&self, case_id: &CaseId) -> Result<usize, ApplicationError> {
        let case_id = case_id.to_string();
        self.with_conn(move |conn| {
            let deleted = conn.execute("DELETE FROM deadlines WHERE case_id = ?1", [&case_id])?;
            debug!(deleted, "Deleted case deadlines");
            Ok(deleted)
        })
        .await
    }
}
