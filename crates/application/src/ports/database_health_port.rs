//! Store health check port
//!
//! Backs the readiness probe without coupling to a particular store.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Health information about the backing store
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    /// Whether the store answered a trivial query
    pub reachable: bool,
    /// Backend name and version, e.g. "SQLite 3.45.0"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    #[must_use]
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            reachable: true,
            version: Some(version.into()),
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub const fn unhealthy() -> Self {
        Self {
            reachable: false,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    #[must_use]
    pub const fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }
}

/// Port for store connectivity checks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Run a lightweight query against the store
    async fn is_available(&self) -> bool;

    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
