//! Bundle of every repository port, handed to services that span entities

use std::sync::Arc;

use crate::ports::{
    AttorneyRepository, CaseRepository, ClientRepository, CourtRepository, DeadlineRepository,
    DocumentRepository, JudgeRepository,
};

/// Shared handles to the practice's repositories
#[derive(Clone)]
pub struct PracticeRepositories {
    pub attorneys: Arc<dyn AttorneyRepository>,
    pub judges: Arc<dyn JudgeRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub courts: Arc<dyn CourtRepository>,
    pub cases: Arc<dyn CaseRepository>,
    pub deadlines: Arc<dyn DeadlineRepository>,
    pub documents: Arc<dyn DocumentRepository>,
}

impl PracticeRepositories {
    /// Use one store that implements every repository port
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: AttorneyRepository
            + JudgeRepository
            + ClientRepository
            + CourtRepository
            + CaseRepository
            + DeadlineRepository
            + DocumentRepository
            + 'static,
    {
        Self {
            attorneys: store.clone(),
            judges: store.clone(),
            clients: store.clone(),
            courts: store.clone(),
            cases: store.clone(),
            deadlines: store.clone(),
            documents: store,
        }
    }
}

impl std::fmt::Debug for PracticeRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticeRepositories").finish_non_exhaustive()
    }
}
