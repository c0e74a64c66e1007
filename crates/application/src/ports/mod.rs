//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod attorney_repository;
mod case_repository;
mod client_repository;
mod clock_port;
mod court_repository;
mod database_health_port;
mod deadline_repository;
mod document_repository;
mod judge_repository;

pub use attorney_repository::AttorneyRepository;
#[cfg(test)]
pub use attorney_repository::MockAttorneyRepository;
pub use case_repository::{CaseFilter, CaseRepository};
#[cfg(test)]
pub use case_repository::MockCaseRepository;
pub use client_repository::ClientRepository;
#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use clock_port::ClockPort;
#[cfg(test)]
pub use clock_port::MockClockPort;
pub use court_repository::CourtRepository;
#[cfg(test)]
pub use court_repository::MockCourtRepository;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use deadline_repository::DeadlineRepository;
#[cfg(test)]
pub use deadline_repository::MockDeadlineRepository;
pub use document_repository::DocumentRepository;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use judge_repository::JudgeRepository;
#[cfg(test)]
pub use judge_repository::MockJudgeRepository;
