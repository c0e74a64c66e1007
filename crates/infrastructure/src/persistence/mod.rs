//! Persistence module
//!
//! SQLite and in-memory stores behind the application's repository ports.

pub mod connection;
pub mod database_health;
mod error;
pub mod memory_store;
pub mod migrations;
pub mod sqlite_store;

use std::sync::Arc;

use application::{PracticeRepositories, ports::DatabaseHealthPort};
use tracing::info;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use database_health::SqliteDatabaseHealth;
pub use error::map_sqlite_error;
pub use memory_store::InMemoryPracticeStore;
pub use sqlite_store::SqlitePracticeStore;

use crate::config::{DatabaseConfig, StorageBackend};

/// Repositories plus the readiness probe for the configured backend
#[derive(Clone)]
pub struct PracticeStorage {
    pub repositories: PracticeRepositories,
    pub health: Arc<dyn DatabaseHealthPort>,
}

impl std::fmt::Debug for PracticeStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticeStorage").finish_non_exhaustive()
    }
}

/// Open the store selected by `database.backend`
pub fn open_storage(config: &DatabaseConfig) -> Result<PracticeStorage, DatabaseError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory practice store");
            let store = Arc::new(InMemoryPracticeStore::new());
            Ok(PracticeStorage {
                repositories: PracticeRepositories::from_store(Arc::clone(&store)),
                health: store,
            })
        },
        StorageBackend::Sqlite => {
            let pool = Arc::new(create_pool(config)?);
            info!(path = %config.path, "Using SQLite practice store");
            Ok(PracticeStorage {
                repositories: PracticeRepositories::from_store(Arc::new(SqlitePracticeStore::new(
                    Arc::clone(&pool),
                ))),
                health: Arc::new(SqliteDatabaseHealth::new(pool)),
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_is_ready() {
        let config = DatabaseConfig {
            backend: StorageBackend::Memory,
            ..DatabaseConfig::default()
        };
        let storage = open_storage(&config).unwrap();
        assert!(storage.health.is_available().await);
        assert!(storage.repositories.cases.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sqlite_backend_is_ready() {
        let storage = open_storage(&DatabaseConfig::sqlite_in_memory()).unwrap();
        assert!(storage.health.is_available().await);
        assert_eq!(storage.repositories.clients.count().await.unwrap(), 0);
    }
}
