//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite and in-memory
//! practice stores, clocks, configuration loading and logging setup.

pub mod clock;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use clock::{FixedClock, SystemClock};
pub use config::{
    AppConfig, DatabaseConfig, Environment, ReportingAppConfig, ServerConfig, StorageBackend,
};
pub use persistence::{
    ConnectionPool, DatabaseError, InMemoryPracticeStore, PracticeStorage, SqliteDatabaseHealth,
    SqlitePracticeStore, create_pool, open_storage,
};
pub use telemetry::{LogFormat, LoggingError, init_logging};
