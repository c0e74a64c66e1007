//! Application layer - Use cases and orchestration
//!
//! Repository and clock ports, the services behind each REST resource, and
//! the reporting service that feeds stored records to the analytics core.

pub mod error;
pub mod ports;
pub mod repositories;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use repositories::PracticeRepositories;
pub use services::*;
