//! Application state shared across handlers

use std::sync::Arc;

use application::{
    AttorneyService, CaseService, ClientService, CourtService, DeadlineService, DocumentService,
    JudgeService, ReportingConfig, ReportingService, SnapshotBuilder,
    ports::{ClockPort, DatabaseHealthPort},
};
use infrastructure::PracticeStorage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub attorneys: Arc<AttorneyService>,
    pub judges: Arc<JudgeService>,
    pub clients: Arc<ClientService>,
    pub courts: Arc<CourtService>,
    pub cases: Arc<CaseService>,
    pub deadlines: Arc<DeadlineService>,
    pub documents: Arc<DocumentService>,
    pub reports: Arc<ReportingService>,
    /// Readiness probe of the configured store
    pub database: Arc<dyn DatabaseHealthPort>,
}

impl AppState {
    /// Wire every service over one storage backend and clock
    pub fn new(
        storage: PracticeStorage,
        clock: Arc<dyn ClockPort>,
        reporting: ReportingConfig,
    ) -> Self {
        let repos = storage.repositories;
        Self {
            attorneys: Arc::new(AttorneyService::new(
                Arc::clone(&repos.attorneys),
                Arc::clone(&repos.cases),
                Arc::clone(&clock),
            )),
            judges: Arc::new(JudgeService::new(
                Arc::clone(&repos.judges),
                Arc::clone(&repos.courts),
                Arc::clone(&repos.cases),
                Arc::clone(&clock),
            )),
            clients: Arc::new(ClientService::new(
                Arc::clone(&repos.clients),
                Arc::clone(&repos.cases),
                Arc::clone(&clock),
            )),
            courts: Arc::new(CourtService::new(
                Arc::clone(&repos.courts),
                Arc::clone(&repos.judges),
                Arc::clone(&repos.cases),
                Arc::clone(&clock),
            )),
            cases: Arc::new(CaseService::new(repos.clone(), Arc::clone(&clock))),
            deadlines: Arc::new(DeadlineService::new(
                Arc::clone(&repos.deadlines),
                Arc::clone(&repos.cases),
                Arc::clone(&clock),
            )),
            documents: Arc::new(DocumentService::new(
                Arc::clone(&repos.documents),
                Arc::clone(&repos.cases),
                Arc::clone(&clock),
            )),
            reports: Arc::new(
                ReportingService::new(SnapshotBuilder::new(repos), clock).with_config(reporting),
            ),
            database: storage.health,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("reporting", self.reports.config())
            .finish_non_exhaustive()
    }
}
