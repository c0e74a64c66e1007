//! SQLite-backed practice store
//!
//! One [`SqlitePracticeStore`] implements every repository port over a shared
//! r2d2 pool. Each call runs on the blocking thread pool; rows come back in
//! insertion order (`seq`).

mod attorneys;
mod cases;
mod clients;
mod courts;
mod deadlines;
mod documents;
mod judges;
mod rows;

use std::sync::Arc;

use application::error::ApplicationError;
use rusqlite::Connection;
use tokio::task;

use super::connection::{ConnectionPool, DatabaseError};

/// SQLite store for every practice entity
#[derive(Debug, Clone)]
pub struct SqlitePracticeStore {
    pool: Arc<ConnectionPool>,
}

impl SqlitePracticeStore {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> Arc<ConnectionPool> {
        Arc::clone(&self.pool)
    }

    /// Run `op` with a pooled connection on the blocking thread pool
    async fn with_conn<T, F>(&self, op: F) -> Result<T, ApplicationError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get()?;
            op(&conn)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
        .map_err(ApplicationError::from)
    }
}

/// Fail with `NotFound` when an UPDATE or DELETE touched no row
fn ensure_affected(affected: usize, entity: &str, id: impl std::fmt::Display) -> Result<(), DatabaseError> {
    if affected == 0 {
        return Err(DatabaseError::NotFound(format!("{entity} {id}")));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};
    use domain::{Attorney, BarNumber, Case, CaseNumber, Client, EmailAddress};

    use super::SqlitePracticeStore;
    use crate::{config::DatabaseConfig, persistence::connection::create_pool};

    pub fn store() -> SqlitePracticeStore {
        let pool = create_pool(&DatabaseConfig::sqlite_in_memory()).unwrap();
        SqlitePracticeStore::new(Arc::new(pool))
    }

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 30, 0).unwrap()
    }

    pub fn attorney(bar: &str) -> Attorney {
        Attorney::new(
            "Nadia",
            "Haddad",
            BarNumber::new(bar).unwrap(),
            EmailAddress::new(format!("{bar}@firm.law")).unwrap(),
            now(),
        )
    }

    pub fn client(email: &str) -> Client {
        Client::new("Omar", "Said", EmailAddress::new(email).unwrap(), now())
    }

    pub fn case(number: &str, client: &Client, attorney: &Attorney) -> Case {
        Case::new(
            CaseNumber::new(number).unwrap(),
            "Said v. Harbor",
            client.id,
            attorney.id,
            now(),
        )
    }
}
