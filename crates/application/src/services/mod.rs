//! Application services - Use case implementations

mod attorney_service;
mod case_service;
mod client_service;
mod court_service;
mod deadline_service;
mod document_service;
mod reporting_service;
mod seed_service;
mod snapshot_builder;

pub use attorney_service::{AttorneyChanges, AttorneyService, NewAttorney};
pub use case_service::{CaseChanges, CaseService, NewCase};
pub use client_service::{ClientChanges, ClientService, NewClient};
pub use court_service::{
    CourtChanges, CourtService, JudgeChanges, JudgeService, NewCourt, NewJudge,
};
pub use deadline_service::{DeadlineChanges, DeadlineService, NewDeadline};
pub use document_service::{DocumentChanges, DocumentService, NewDocument};
pub use reporting_service::{ReportingConfig, ReportingService};
pub use seed_service::{SeedReport, SeedService};
pub use snapshot_builder::{PracticeSnapshot, SnapshotBuilder};
