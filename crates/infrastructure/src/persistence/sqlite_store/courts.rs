//! Courts table

use application::{error::ApplicationError, ports::CourtRepository};
use async_trait::async_trait;
use domain::{Court, CourtId};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{COURT_COLUMNS, row_to_court, ts},
};

#[async_trait]
impl CourtRepository for SqlitePracticeStore {
    #[instrument(skip(self, court), fields(court_id = %court.id))]
    async fn insert(&self, court: &Court) -> Result<(), ApplicationError> {
        let c = court.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO courts (
                    id, name, jurisdiction, address, court_type, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    c.id.to_string(),
                    c.name,
                    c.jurisdiction,
                    c.address,
                    c.court_type,
                    ts(c.created_at),
                    ts(c.updated_at),
                ],
            )?;
            debug!("Saved court");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, court), fields(court_id = %court.id))]
    async fn update(&self, court: &Court) -> Result<(), ApplicationError> {
        let c = court.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE courts SET
                    name = ?1, jurisdiction = ?2, address = ?3, court_type = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    c.name,
                    c.jurisdiction,
                    c.address,
                    c.court_type,
                    ts(c.updated_at),
                    c.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Court", c.id)
        })
        .await
    }

    #[instrument(skip(self), fields(court_id = %id))]
    async fn get(&self, id: &CourtId) -> Result<Option<Court>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let court = conn
                .query_row(
                    &format!("SELECT {COURT_COLUMNS} FROM courts WHERE id = ?1"),
                    [&id],
                    row_to_court,
                )
                .optional()?;
            Ok(court)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Court>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {COURT_COLUMNS} FROM courts ORDER BY seq"))?;
            let courts = stmt
                .query_map([], row_to_court)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(courts)
        })
        .await
    }

    #[instrument(skip(self), fields(court_id = %id))]
    async fn delete(&self, id: &CourtId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM courts WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Court", id)
        })
        .await
    }
}
