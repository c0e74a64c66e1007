//! Deadline Service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{CaseId, Deadline, DeadlineId, analytics::metrics};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::{
    error::ApplicationError,
    ports::{CaseRepository, ClockPort, DeadlineRepository},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDeadline {
    pub case_id: CaseId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub is_critical: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DeadlineChanges {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_critical: Option<bool>,
    /// `true` completes at now, `false` reopens
    pub is_completed: Option<bool>,
}

pub struct DeadlineService {
    deadlines: Arc<dyn DeadlineRepository>,
    cases: Arc<dyn CaseRepository>,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for DeadlineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeadlineService").finish_non_exhaustive()
    }
}

impl DeadlineService {
    pub fn new(
        deadlines: Arc<dyn DeadlineRepository>,
        cases: Arc<dyn CaseRepository>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            deadlines,
            cases,
            clock,
        }
    }

    #[instrument(skip(self, input), fields(case_id = %input.case_id))]
    pub async fn create(&self, input: NewDeadline) -> Result<Deadline, ApplicationError> {
        self.ensure_case(&input.case_id).await?;

        let mut deadline = Deadline::new(input.case_id, input.title, input.due_date, self.clock.now());
        deadline.description = input.description;
        deadline.is_critical = input.is_critical;

        self.deadlines.insert(&deadline).await?;
        info!(deadline_id = %deadline.id, due = %deadline.due_date, "Created deadline");
        Ok(deadline)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &DeadlineId) -> Result<Deadline, ApplicationError> {
        self.deadlines
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Deadline", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Deadline>, ApplicationError> {
        self.deadlines.list().await
    }

    #[instrument(skip(self))]
    pub async fn list_for_case(&self, case_id: &CaseId) -> Result<Vec<Deadline>, ApplicationError> {
        self.ensure_case(case_id).await?;
        self.deadlines.list_by_case(case_id).await
    }

    /// Incomplete deadlines of a case due within `days`, earliest first
    ///
    /// Overdue deadlines are included; equal due dates keep storage order.
    #[instrument(skip(self))]
    pub async fn upcoming_for_case(
        &self,
        case_id: &CaseId,
        days: i64,
    ) -> Result<Vec<Deadline>, ApplicationError> {
        let deadlines = self.list_for_case(case_id).await?;
        let upcoming: Vec<Deadline> = metrics::due_within(&deadlines, self.clock.now(), days)
            .into_iter()
            .cloned()
            .collect();
        debug!(count = upcoming.len(), "Upcoming deadlines");
        Ok(upcoming)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &DeadlineId,
        changes: DeadlineChanges,
    ) -> Result<Deadline, ApplicationError> {
        let mut deadline = self.get(id).await?;
        let now = self.clock.now();

        if let Some(title) = changes.title {
            deadline.title = title;
        }
        if changes.description.is_some() {
            deadline.description = changes.description;
        }
        if let Some(due_date) = changes.due_date {
            deadline.due_date = due_date;
        }
        if let Some(is_critical) = changes.is_critical {
            deadline.is_critical = is_critical;
        }
        match changes.is_completed {
            Some(true) if !deadline.is_completed => deadline.complete(now),
            Some(false) if deadline.is_completed => deadline.reopen(now),
            _ => {},
        }
        deadline.updated_at = now;

        self.deadlines.update(&deadline).await?;
        Ok(deadline)
    }

    /// Mark a deadline completed now; completing twice keeps the first date
    #[instrument(skip(self))]
    pub async fn complete(&self, id: &DeadlineId) -> Result<Deadline, ApplicationError> {
        let mut deadline = self.get(id).await?;
        if deadline.is_completed {
            return Ok(deadline);
        }
        deadline.complete(self.clock.now());
        self.deadlines.update(&deadline).await?;
        info!(deadline_id = %id, "Completed deadline");
        Ok(deadline)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &DeadlineId) -> Result<(), ApplicationError> {
        self.get(id).await?;
        self.deadlines.delete(id).await
    }

    async fn ensure_case(&self, case_id: &CaseId) -> Result<(), ApplicationError> {
        match self.cases.get(case_id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::not_found("Case", case_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use domain::{AttorneyId, Case, CaseNumber, ClientId};

    use super::*;
    use crate::ports::{MockCaseRepository, MockClockPort, MockDeadlineRepository};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 14, 0, 0).unwrap()
    }

    fn existing_case() -> MockCaseRepository {
        let mut cases = MockCaseRepository::new();
        cases.expect_get().returning(|_| {
            Ok(Some(Case::new(
                CaseNumber::new("CV-8").unwrap(),
                "Matter",
                ClientId::new(),
                AttorneyId::new(),
                now(),
            )))
        });
        cases
    }

    fn service(deadlines: MockDeadlineRepository, cases: MockCaseRepository) -> DeadlineService {
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now());
        DeadlineService::new(Arc::new(deadlines), Arc::new(cases), Arc::new(clock))
    }

    fn due(case_id: CaseId, days: i64, title: &str) -> Deadline {
        Deadline::new(case_id, title, now() + Duration::days(days), now())
    }

    #[tokio::test]
    async fn create_requires_existing_case() {
        let mut cases = MockCaseRepository::new();
        cases.expect_get().returning(|_| Ok(None));
        let mut deadlines = MockDeadlineRepository::new();
        deadlines.expect_insert().never();

        let result = service(deadlines, cases)
            .create(NewDeadline {
                case_id: CaseId::new(),
                title: "Answer".into(),
                description: None,
                due_date: now(),
                is_critical: true,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn upcoming_filters_and_sorts() {
        let case_id = CaseId::new();
        let mut done = due(case_id, 1, "done");
        done.complete(now());
        let stored = vec![
            due(case_id, 6, "six"),
            due(case_id, -2, "overdue"),
            due(case_id, 30, "far"),
            done,
            due(case_id, 2, "two-a"),
            due(case_id, 2, "two-b"),
        ];
        let mut deadlines = MockDeadlineRepository::new();
        deadlines
            .expect_list_by_case()
            .returning(move |_| Ok(stored.clone()));

        let titles: Vec<_> = service(deadlines, existing_case())
            .upcoming_for_case(&case_id, 7)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["overdue", "two-a", "two-b", "six"]);
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let mut deadline = due(CaseId::new(), 3, "Brief");
        let first = now() - Duration::days(1);
        deadline.complete(first);
        let id = deadline.id;
        let mut deadlines = MockDeadlineRepository::new();
        deadlines
            .expect_get()
            .returning(move |_| Ok(Some(deadline.clone())));
        deadlines.expect_update().never();

        let completed = service(deadlines, MockCaseRepository::new())
            .complete(&id)
            .await
            .unwrap();
        assert_eq!(completed.completed_date, Some(first));
    }

    #[tokio::test]
    async fn complete_stamps_now() {
        let deadline = due(CaseId::new(), 3, "Brief");
        let id = deadline.id;
        let mut deadlines = MockDeadlineRepository::new();
        deadlines
            .expect_get()
            .returning(move |_| Ok(Some(deadline.clone())));
        deadlines
            .expect_update()
            .withf(|d| d.is_completed && d.completed_date == Some(now()))
            .times(1)
            .returning(|_| Ok(()));

        service(deadlines, MockCaseRepository::new())
            .complete(&id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_can_reopen() {
        let mut deadline = due(CaseId::new(), -1, "Filing");
        deadline.complete(now());
        let id = deadline.id;
        let mut deadlines = MockDeadlineRepository::new();
        deadlines
            .expect_get()
            .returning(move |_| Ok(Some(deadline.clone())));
        deadlines.expect_update().returning(|_| Ok(()));

        let reopened = service(deadlines, MockCaseRepository::new())
            .update(
                &id,
                DeadlineChanges {
                    is_completed: Some(false),
                    ..DeadlineChanges::default()
                },
            )
            .await
            .unwrap();
        assert!(!reopened.is_completed);
        assert!(reopened.is_overdue(now()));
    }
}
