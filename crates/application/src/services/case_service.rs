//! Case Service - opening, updating and closing matters
//!
//! Every reference on a case (client, attorney, court, judge) must resolve
//! when it is written. Deleting a case removes its deadlines and documents.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{AttorneyId, Case, CaseId, CaseNumber, CaseStatus, ClientId, CourtId, JudgeId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use validator::{Validate, ValidationError};

use crate::{error::ApplicationError, ports::ClockPort, repositories::PracticeRepositories};

/// Upper bound accepted for a case's estimated value
const MAX_ESTIMATED_VALUE: i64 = 1_000_000_000_000_000;

/// Estimated values must lie within `0..=MAX_ESTIMATED_VALUE`
fn validate_estimated_value(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_value")
            .with_message("estimated value must not be negative".into()));
    }
    if *value > Decimal::from(MAX_ESTIMATED_VALUE) {
        return Err(ValidationError::new("value_too_large").with_message(
            format!("estimated value must not exceed {MAX_ESTIMATED_VALUE}").into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCase {
    #[validate(length(min = 1, max = 50))]
    pub case_number: String,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    /// Exact status literal; defaults to `Active`
    pub status: Option<String>,
    #[validate(length(max = 100))]
    pub case_type: Option<String>,
    /// Defaults to now
    pub filing_date: Option<DateTime<Utc>>,
    #[validate(custom(function = "validate_estimated_value"))]
    pub estimated_value: Option<Decimal>,
    pub client_id: ClientId,
    pub attorney_id: AttorneyId,
    pub court_id: Option<CourtId>,
    pub judge_id: Option<JudgeId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CaseChanges {
    #[validate(length(min = 1, max = 50))]
    pub case_number: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 100))]
    pub case_type: Option<String>,
    pub filing_date: Option<DateTime<Utc>>,
    #[validate(custom(function = "validate_estimated_value"))]
    pub estimated_value: Option<Decimal>,
    pub client_id: Option<ClientId>,
    pub attorney_id: Option<AttorneyId>,
    pub court_id: Option<CourtId>,
    pub judge_id: Option<JudgeId>,
}

/// Service for cases
pub struct CaseService {
    repos: PracticeRepositories,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for CaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseService").finish_non_exhaustive()
    }
}

impl CaseService {
    pub fn new(repos: PracticeRepositories, clock: Arc<dyn ClockPort>) -> Self {
        Self { repos, clock }
    }

    #[instrument(skip(self, input), fields(case_number = %input.case_number))]
    pub async fn create(&self, input: NewCase) -> Result<Case, ApplicationError> {
        let case_number = CaseNumber::new(input.case_number)?;
        let status = input
            .status
            .as_deref()
            .map(str::parse::<CaseStatus>)
            .transpose()?
            .unwrap_or_default();
        self.ensure_number_free(&case_number, None).await?;
        self.ensure_client(&input.client_id).await?;
        self.ensure_attorney(&input.attorney_id).await?;
        self.ensure_bench(input.court_id.as_ref(), input.judge_id.as_ref())
            .await?;

        let now = self.clock.now();
        let mut case = Case::new(
            case_number,
            input.title,
            input.client_id,
            input.attorney_id,
            now,
        );
        case.description = input.description;
        case.case_type = input.case_type;
        case.estimated_value = input.estimated_value;
        case.court_id = input.court_id;
        case.judge_id = input.judge_id;
        if let Some(filing_date) = input.filing_date {
            case.filing_date = filing_date;
        }
        if status != case.status {
            case.transition_to(status, now);
        }

        self.repos.cases.insert(&case).await?;
        info!(case_id = %case.id, status = %case.status, "Opened case");
        Ok(case)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &CaseId) -> Result<Case, ApplicationError> {
        self.repos
            .cases
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Case", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Case>, ApplicationError> {
        self.repos.cases.list().await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: &CaseId, changes: CaseChanges) -> Result<Case, ApplicationError> {
        let mut case = self.get(id).await?;
        let now = self.clock.now();

        if let Some(number) = changes.case_number {
            let number = CaseNumber::new(number)?;
            self.ensure_number_free(&number, Some(case.id)).await?;
            case.case_number = number;
        }
        if let Some(status) = changes.status {
            let status: CaseStatus = status.parse()?;
            case.transition_to(status, now);
        }
        if let Some(client_id) = changes.client_id {
            self.ensure_client(&client_id).await?;
            case.client_id = client_id;
        }
        if let Some(attorney_id) = changes.attorney_id {
            self.ensure_attorney(&attorney_id).await?;
            case.attorney_id = attorney_id;
        }
        if changes.court_id.is_some() || changes.judge_id.is_some() {
            self.ensure_bench(changes.court_id.as_ref(), changes.judge_id.as_ref())
                .await?;
            case.court_id = changes.court_id.or(case.court_id);
            case.judge_id = changes.judge_id.or(case.judge_id);
        }
        if let Some(title) = changes.title {
            case.title = title;
        }
        if changes.description.is_some() {
            case.description = changes.description;
        }
        if changes.case_type.is_some() {
            case.case_type = changes.case_type;
        }
        if let Some(filing_date) = changes.filing_date {
            case.filing_date = filing_date;
        }
        if changes.estimated_value.is_some() {
            case.estimated_value = changes.estimated_value;
        }
        case.updated_at = now;

        self.repos.cases.update(&case).await?;
        info!(case_id = %case.id, status = %case.status, "Updated case");
        Ok(case)
    }

    /// Delete a case together with its deadlines and documents
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &CaseId) -> Result<(), ApplicationError> {
        let case = self.get(id).await?;
        let deadlines = self.repos.deadlines.delete_by_case(&case.id).await?;
        let documents = self.repos.documents.delete_by_case(&case.id).await?;
        self.repos.cases.delete(&case.id).await?;
        info!(case_id = %id, deadlines, documents, "Deleted case");
        Ok(())
    }

    async fn ensure_number_free(
        &self,
        case_number: &CaseNumber,
        except: Option<CaseId>,
    ) -> Result<(), ApplicationError> {
        match self.repos.cases.find_by_case_number(case_number).await? {
            Some(found) if Some(found.id) != except => Err(ApplicationError::Conflict(format!(
                "case number {case_number} is already in use"
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_client(&self, id: &ClientId) -> Result<(), ApplicationError> {
        self.repos
            .clients
            .get(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApplicationError::not_found("Client", id))
    }

    async fn ensure_attorney(&self, id: &AttorneyId) -> Result<(), ApplicationError> {
        self.repos
            .attorneys
            .get(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApplicationError::not_found("Attorney", id))
    }

    async fn ensure_bench(
        &self,
        court_id: Option<&CourtId>,
        judge_id: Option<&JudgeId>,
    ) -> Result<(), ApplicationError> {
        if let Some(court_id) = court_id {
            if self.repos.courts.get(court_id).await?.is_none() {
                return Err(ApplicationError::not_found("Court", court_id));
            }
        }
        if let Some(judge_id) = judge_id {
            if self.repos.judges.get(judge_id).await?.is_none() {
                return Err(ApplicationError::not_found("Judge", judge_id));
            }
        }
        debug!("Case references resolved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::{Attorney, BarNumber, Client, EmailAddress};

    use super::*;
    use crate::ports::{
        MockAttorneyRepository, MockCaseRepository, MockClientRepository, MockClockPort,
        MockCourtRepository, MockDeadlineRepository, MockDocumentRepository, MockJudgeRepository,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap()
    }

    struct Mocks {
        attorneys: MockAttorneyRepository,
        clients: MockClientRepository,
        cases: MockCaseRepository,
        deadlines: MockDeadlineRepository,
        documents: MockDocumentRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                attorneys: MockAttorneyRepository::new(),
                clients: MockClientRepository::new(),
                cases: MockCaseRepository::new(),
                deadlines: MockDeadlineRepository::new(),
                documents: MockDocumentRepository::new(),
            }
        }

        fn with_parties(mut self) -> Self {
            self.clients.expect_get().returning(|_| {
                Ok(Some(Client::new(
                    "Li",
                    "Wei",
                    EmailAddress::new("li@wei.cn").unwrap(),
                    now(),
                )))
            });
            self.attorneys.expect_get().returning(|_| {
                Ok(Some(Attorney::new(
                    "Ada",
                    "Okafor",
                    BarNumber::new("NY-1").unwrap(),
                    EmailAddress::new("ada@firm.law").unwrap(),
                    now(),
                )))
            });
            self
        }

        fn service(self) -> CaseService {
            let mut clock = MockClockPort::new();
            clock.expect_now().return_const(now());
            let repos = PracticeRepositories {
                attorneys: Arc::new(self.attorneys),
                judges: Arc::new(MockJudgeRepository::new()),
                clients: Arc::new(self.clients),
                courts: Arc::new(MockCourtRepository::new()),
                cases: Arc::new(self.cases),
                deadlines: Arc::new(self.deadlines),
                documents: Arc::new(self.documents),
            };
            CaseService::new(repos, Arc::new(clock))
        }
    }

    fn input(status: Option<&str>) -> NewCase {
        NewCase {
            case_number: "cv-2024-001".into(),
            title: "Wei v. Acme".into(),
            description: None,
            status: status.map(str::to_string),
            case_type: Some("Civil".into()),
            filing_date: None,
            estimated_value: Some(Decimal::from(250_000)),
            client_id: ClientId::new(),
            attorney_id: AttorneyId::new(),
            court_id: None,
            judge_id: None,
        }
    }

    fn stored_case() -> Case {
        Case::new(
            CaseNumber::new("CV-2024-001").unwrap(),
            "Existing",
            ClientId::new(),
            AttorneyId::new(),
            now(),
        )
    }

    #[tokio::test]
    async fn create_defaults_to_active() {
        let mut mocks = Mocks::new().with_parties();
        mocks.cases.expect_find_by_case_number().returning(|_| Ok(None));
        mocks.cases.expect_insert().times(1).returning(|_| Ok(()));

        let case = mocks.service().create(input(None)).await.unwrap();
        assert_eq!(case.status, CaseStatus::Active);
        assert_eq!(case.case_number.as_str(), "CV-2024-001");
        assert_eq!(case.filing_date, now());
    }

    #[tokio::test]
    async fn create_closed_case_stamps_closed_date() {
        let mut mocks = Mocks::new().with_parties();
        mocks.cases.expect_find_by_case_number().returning(|_| Ok(None));
        mocks.cases.expect_insert().returning(|_| Ok(()));

        let case = mocks.service().create(input(Some("Closed"))).await.unwrap();
        assert_eq!(case.closed_date, Some(now()));
    }

    #[tokio::test]
    async fn lowercase_status_is_rejected() {
        let result = Mocks::new().service().create(input(Some("closed"))).await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn duplicate_case_number_conflicts() {
        let mut mocks = Mocks::new();
        mocks
            .cases
            .expect_find_by_case_number()
            .returning(|_| Ok(Some(stored_case())));
        mocks.cases.expect_insert().never();

        let result = mocks.service().create(input(None)).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[tokio::test]
    async fn unknown_client_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.cases.expect_find_by_case_number().returning(|_| Ok(None));
        mocks.clients.expect_get().returning(|_| Ok(None));
        mocks.cases.expect_insert().never();

        let result = mocks.service().create(input(None)).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(msg)) if msg.starts_with("Client")));
    }

    #[tokio::test]
    async fn update_status_transitions_case() {
        let mut mocks = Mocks::new();
        mocks
            .cases
            .expect_get()
            .returning(|_| Ok(Some(stored_case())));
        mocks.cases.expect_update().times(1).returning(|_| Ok(()));

        let case = mocks
            .service()
            .update(
                &CaseId::new(),
                CaseChanges {
                    status: Some("Closed".into()),
                    ..CaseChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(case.status, CaseStatus::Closed);
        assert_eq!(case.closed_date, Some(now()));
    }

    #[tokio::test]
    async fn delete_cascades_to_deadlines_and_documents() {
        let mut mocks = Mocks::new();
        mocks
            .cases
            .expect_get()
            .returning(|_| Ok(Some(stored_case())));
        mocks
            .deadlines
            .expect_delete_by_case()
            .times(1)
            .returning(|_| Ok(3));
        mocks
            .documents
            .expect_delete_by_case()
            .times(1)
            .returning(|_| Ok(1));
        mocks.cases.expect_delete().times(1).returning(|_| Ok(()));

        mocks.service().delete(&CaseId::new()).await.unwrap();
    }

    fn new_case(value: Option<Decimal>) -> NewCase {
        NewCase {
            case_number: "CV-2024-001".into(),
            title: "Vogel v. Harbor".into(),
            description: None,
            status: None,
            case_type: None,
            filing_date: None,
            estimated_value: value,
            client_id: ClientId::new(),
            attorney_id: AttorneyId::new(),
            court_id: None,
            judge_id: None,
        }
    }

    #[test]
    fn estimated_value_must_be_within_bounds() {
        assert!(new_case(None).validate().is_ok());
        assert!(new_case(Some(Decimal::ZERO)).validate().is_ok());
        assert!(new_case(Some(Decimal::from(MAX_ESTIMATED_VALUE))).validate().is_ok());

        let errors = new_case(Some(Decimal::MAX)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("estimated_value"));
        assert!(new_case(Some(Decimal::new(-1, 2))).validate().is_err());

        let changes = CaseChanges {
            estimated_value: Some(Decimal::from(MAX_ESTIMATED_VALUE) + Decimal::ONE),
            ..CaseChanges::default()
        };
        assert!(changes.validate().is_err());
    }
}
