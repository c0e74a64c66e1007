//! SQLite database health adapter

use std::sync::Arc;
use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{ConnectionPool, DatabaseError, migrations};

/// Readiness probe over the shared connection pool
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("pool", &"<ConnectionPool>")
            .finish()
    }
}

impl SqliteDatabaseHealth {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        let pool = Arc::clone(&self.pool);
        let result = tokio::task::spawn_blocking(move || {
            pool.get()
                .ok()
                .and_then(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0)).ok())
                .is_some()
        })
        .await;

        match result {
            Ok(true) => true,
            Ok(false) => {
                warn!("Database health check failed: unable to execute query");
                false
            },
            Err(e) => {
                warn!(error = %e, "Database health check failed: task panicked");
                false
            },
        }
    }

    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let start = Instant::now();

        let (version, schema, pool_size) = tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let version: String = conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))?;
            let schema = migrations::schema_version(&conn)?;
            Ok::<_, DatabaseError>((version, schema, pool.state().connections))
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Database health check task failed: {e}")))?
        .inspect_err(|e| warn!(error = %e, "Database health check failed"))?;

        let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(%version, schema, pool_size, response_time_ms, "Database health check passed");

        Ok(DatabaseHealth::healthy(format!("SQLite {version} (schema v{schema})"))
            .with_pool_size(pool_size)
            .with_response_time(response_time_ms))
    }
}
