//! Snapshot Builder - joins stored records into the analytics input
//!
//! One [`PracticeSnapshot`] is built per report request. References that do
//! not resolve (a deleted client, an unknown attorney) are left empty and
//! rendered as placeholders by the analytics.

use std::collections::HashMap;

use domain::analytics::{AttorneyAggregate, CaseSnapshot};
use domain::{Attorney, AttorneyId, CaseId, Client, ClientId, Deadline};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, repositories::PracticeRepositories};

/// Everything a reporting pass reads
#[derive(Debug, Clone, Default)]
pub struct PracticeSnapshot {
    /// Cases in storage order
    pub cases: Vec<CaseSnapshot>,
    /// Attorneys in storage order, each with their cases
    pub attorneys: Vec<AttorneyAggregate>,
    pub client_count: usize,
}

pub struct SnapshotBuilder {
    repos: PracticeRepositories,
}

impl std::fmt::Debug for SnapshotBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotBuilder").finish_non_exhaustive()
    }
}

impl SnapshotBuilder {
    #[must_use]
    pub const fn new(repos: PracticeRepositories) -> Self {
        Self { repos }
    }

    #[instrument(skip(self))]
    pub async fn build(&self) -> Result<PracticeSnapshot, ApplicationError> {
        let (cases, clients, attorneys, deadlines) = tokio::try_join!(
            self.repos.cases.list(),
            self.repos.clients.list(),
            self.repos.attorneys.list(),
            self.repos.deadlines.list(),
        )?;

        let clients: HashMap<ClientId, &Client> = clients.iter().map(|c| (c.id, c)).collect();
        let attorney_index: HashMap<AttorneyId, &Attorney> =
            attorneys.iter().map(|a| (a.id, a)).collect();
        let mut deadlines_by_case: HashMap<CaseId, Vec<&Deadline>> = HashMap::new();
        for deadline in &deadlines {
            deadlines_by_case
                .entry(deadline.case_id)
                .or_default()
                .push(deadline);
        }

        let mut by_attorney: HashMap<AttorneyId, Vec<CaseSnapshot>> = HashMap::new();
        let snapshots: Vec<CaseSnapshot> = cases
            .iter()
            .map(|case| {
                let snapshot = CaseSnapshot::assemble(
                    case,
                    clients.get(&case.client_id).copied(),
                    attorney_index.get(&case.attorney_id).copied(),
                    deadlines_by_case
                        .get(&case.id)
                        .into_iter()
                        .flatten()
                        .copied(),
                );
                by_attorney
                    .entry(case.attorney_id)
                    .or_default()
                    .push(snapshot.clone());
                snapshot
            })
            .collect();

        let aggregates = attorneys
            .iter()
            .map(|a| AttorneyAggregate::new(a, by_attorney.remove(&a.id).unwrap_or_default()))
            .collect();

        debug!(
            cases = snapshots.len(),
            attorneys = attorneys.len(),
            deadlines = deadlines.len(),
            "Built practice snapshot"
        );

        Ok(PracticeSnapshot {
            cases: snapshots,
            attorneys: aggregates,
            client_count: clients.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use domain::analytics::UNKNOWN_PARTY;
    use domain::{BarNumber, Case, CaseNumber, EmailAddress};

    use super::*;
    use crate::ports::{
        MockAttorneyRepository, MockCaseRepository, MockClientRepository, MockCourtRepository,
        MockDeadlineRepository, MockDocumentRepository, MockJudgeRepository,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap()
    }

    fn builder(
        cases: Vec<Case>,
        clients: Vec<Client>,
        attorneys: Vec<Attorney>,
        deadlines: Vec<Deadline>,
    ) -> SnapshotBuilder {
        let mut case_repo = MockCaseRepository::new();
        case_repo.expect_list().returning(move || Ok(cases.clone()));
        let mut client_repo = MockClientRepository::new();
        client_repo
            .expect_list()
            .returning(move || Ok(clients.clone()));
        let mut attorney_repo = MockAttorneyRepository::new();
        attorney_repo
            .expect_list()
            .returning(move || Ok(attorneys.clone()));
        let mut deadline_repo = MockDeadlineRepository::new();
        deadline_repo
            .expect_list()
            .returning(move || Ok(deadlines.clone()));

        SnapshotBuilder::new(PracticeRepositories {
            attorneys: Arc::new(attorney_repo),
            judges: Arc::new(MockJudgeRepository::new()),
            clients: Arc::new(client_repo),
            courts: Arc::new(MockCourtRepository::new()),
            cases: Arc::new(case_repo),
            deadlines: Arc::new(deadline_repo),
            documents: Arc::new(MockDocumentRepository::new()),
        })
    }

    fn attorney(bar: &str) -> Attorney {
        Attorney::new(
            "Sam",
            bar,
            BarNumber::new(bar).unwrap(),
            EmailAddress::new(format!("{bar}@firm.law")).unwrap(),
            now(),
        )
    }

    #[tokio::test]
    async fn joins_names_and_groups_deadlines() {
        let counsel = attorney("CA-1");
        let idle = attorney("CA-2");
        let client = Client::new("Li", "Wei", EmailAddress::new("li@wei.cn").unwrap(), now());
        let case = Case::new(
            CaseNumber::new("CV-1").unwrap(),
            "Wei v. Acme",
            client.id,
            counsel.id,
            now(),
        );
        let deadlines = vec![
            Deadline::new(case.id, "second", now() + Duration::days(2), now()),
            Deadline::new(case.id, "first", now() + Duration::days(1), now()),
        ];

        let snapshot = builder(
            vec![case],
            vec![client],
            vec![counsel.clone(), idle],
            deadlines,
        )
        .build()
        .await
        .unwrap();

        assert_eq!(snapshot.client_count, 1);
        let case = &snapshot.cases[0];
        assert_eq!(case.client_label(), "Li Wei");
        assert_eq!(case.attorney_label(), "Sam CA-1");
        let order: Vec<_> = case
            .deadlines
            .iter()
            .map(|d| d.description.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(order, vec!["second", "first"]);

        assert_eq!(snapshot.attorneys.len(), 2);
        assert_eq!(snapshot.attorneys[0].attorney_id, counsel.id);
        assert_eq!(snapshot.attorneys[0].cases_assigned.len(), 1);
        assert!(snapshot.attorneys[1].cases_assigned.is_empty());
    }

    #[tokio::test]
    async fn dangling_references_become_placeholders() {
        let case = Case::new(
            CaseNumber::new("CV-2").unwrap(),
            "Orphan",
            ClientId::new(),
            AttorneyId::new(),
            now(),
        );
        let snapshot = builder(vec![case], vec![], vec![], vec![])
            .build()
            .await
            .unwrap();
        assert_eq!(snapshot.cases[0].client_label(), UNKNOWN_PARTY);
        assert_eq!(snapshot.cases[0].attorney_label(), UNKNOWN_PARTY);
        assert!(snapshot.attorneys.is_empty());
    }

    #[tokio::test]
    async fn repository_failure_surfaces() {
        let mut cases = MockCaseRepository::new();
        cases
            .expect_list()
            .returning(|| Err(ApplicationError::Repository("offline".into())));
        let mut clients = MockClientRepository::new();
        clients.expect_list().returning(|| Ok(vec![]));
        let mut attorneys = MockAttorneyRepository::new();
        attorneys.expect_list().returning(|| Ok(vec![]));
        let mut deadlines = MockDeadlineRepository::new();
        deadlines.expect_list().returning(|| Ok(vec![]));

        let builder = SnapshotBuilder::new(PracticeRepositories {
            attorneys: Arc::new(attorneys),
            judges: Arc::new(MockJudgeRepository::new()),
            clients: Arc::new(clients),
            courts: Arc::new(MockCourtRepository::new()),
            cases: Arc::new(cases),
            deadlines: Arc::new(deadlines),
            documents: Arc::new(MockDocumentRepository::new()),
        });
        assert!(matches!(
            builder.build().await,
            Err(ApplicationError::Repository(_))
        ));
    }
}
