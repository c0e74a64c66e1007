//! CaseLedger HTTP presentation layer
//!
//! REST endpoints for practice records, reports and the dashboard.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use state::AppState;
