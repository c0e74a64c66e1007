//! Domain layer for CaseLedger
//!
//! Entities and value objects of a law-firm practice, the domain error type,
//! and the analytics core that scores and ranks cases for reporting.

pub mod analytics;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
