//! Judges table

use application::{error::ApplicationError, ports::JudgeRepository};
use async_trait::async_trait;
use domain::{CourtId, Judge, JudgeId};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{JUDGE_COLUMNS, date_text, row_to_judge, ts},
};

#[async_trait]
impl JudgeRepository for SqlitePracticeStore {
    #[instrument(skip(self, judge), fields(judge_id = %judge.id))]
    async fn insert(&self, judge: &Judge) -> Result<(), ApplicationError> {
        let j = judge.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO judges (
                    id, first_name, last_name, court_id, appointed_date, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    j.id.to_string(),
                    j.first_name,
                    j.last_name,
                    j.court_id.map(|c| c.to_string()),
                    j.appointed_date.map(date_text),
                    ts(j.created_at),
                    ts(j.updated_at),
                ],
            )?;
            debug!("Saved judge");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, judge), fields(judge_id = %judge.id))]
    async fn update(&self, judge: &Judge) -> Result<(), ApplicationError> {
        let j = judge.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE judges SET
                    first_name = ?1, last_name = ?2, court_id = ?3,
                    appointed_date = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    j.first_name,
                    j.last_name,
                    j.court_id.map(|c| c.to_string()),
                    j.appointed_date.map(date_text),
                    ts(j.updated_at),
                    j.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Judge", j.id)
        })
        .await
    }

    #[instrument(skip(self), fields(judge_id = %id))]
    async fn get(&self, id: &JudgeId) -> Result<Option<Judge>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let judge = conn
                .query_row(
                    &format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE id = ?1"),
                    [&id],
                    row_to_judge,
                )
                .optional()?;
            Ok(judge)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Judge>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {JUDGE_COLUMNS} FROM judges ORDER BY seq"))?;
            let judges = stmt
                .query_map([], row_to_judge)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(judges)
        })
        .await
    }

    #[instrument(skip(self), fields(judge_id = %id))]
    async fn delete(&self, id: &JudgeId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM judges WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Judge", id)
        })
        .await
    }

    #[instrument(skip(self), fields(court_id = %court_id))]
    async fn list_by_court(&self, court_id: &CourtId) -> Result<Vec<Judge>, ApplicationError> {
        let court_id = court_id.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JUDGE_COLUMNS} FROM judges WHERE court_id = ?1 ORDER BY seq"
            ))?;
            let judges = stmt
                .query_map([&court_id], row_to_judge)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(judges)
        })
        .await
    }
}
