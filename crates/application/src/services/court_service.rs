//! Court and judge services
//!
//! Judges optionally sit on a court, so both live here.

use std::sync::Arc;

use chrono::NaiveDate;
use domain::{Court, CourtId, Judge, JudgeId};
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApplicationError,
    ports::{CaseFilter, CaseRepository, ClockPort, CourtRepository, JudgeRepository},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCourt {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub jurisdiction: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub court_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CourtChanges {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub jurisdiction: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub court_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewJudge {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub court_id: Option<CourtId>,
    pub appointed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct JudgeChanges {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub court_id: Option<CourtId>,
    pub appointed_date: Option<NaiveDate>,
}

/// Service for courts
pub struct CourtService {
    courts: Arc<dyn CourtRepository>,
    judges: Arc<dyn JudgeRepository>,
    cases: Arc<dyn CaseRepository>,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for CourtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourtService").finish_non_exhaustive()
    }
}

impl CourtService {
    pub fn new(
        courts: Arc<dyn CourtRepository>,
        judges: Arc<dyn JudgeRepository>,
        cases: Arc<dyn CaseRepository>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            courts,
            judges,
            cases,
            clock,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewCourt) -> Result<Court, ApplicationError> {
        let mut court = Court::new(input.name, input.jurisdiction, self.clock.now());
        court.address = input.address;
        court.court_type = input.court_type;
        self.courts.insert(&court).await?;
        info!(court_id = %court.id, "Created court");
        Ok(court)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &CourtId) -> Result<Court, ApplicationError> {
        self.courts
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Court", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Court>, ApplicationError> {
        self.courts.list().await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &CourtId,
        changes: CourtChanges,
    ) -> Result<Court, ApplicationError> {
        let mut court = self.get(id).await?;
        if let Some(name) = changes.name {
            court.name = name;
        }
        if let Some(jurisdiction) = changes.jurisdiction {
            court.jurisdiction = jurisdiction;
        }
        if changes.address.is_some() {
            court.address = changes.address;
        }
        if changes.court_type.is_some() {
            court.court_type = changes.court_type;
        }
        court.updated_at = self.clock.now();
        self.courts.update(&court).await?;
        Ok(court)
    }

    /// Remove a court that no judge or case refers to
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &CourtId) -> Result<(), ApplicationError> {
        let court = self.get(id).await?;
        if !self.judges.list_by_court(&court.id).await?.is_empty() {
            return Err(ApplicationError::Conflict(format!(
                "court {id} still has judges assigned"
            )));
        }
        if !self
            .cases
            .list_where(CaseFilter::Court(court.id))
            .await?
            .is_empty()
        {
            return Err(ApplicationError::Conflict(format!(
                "court {id} is referenced by cases"
            )));
        }
        self.courts.delete(id).await?;
        info!(court_id = %id, "Deleted court");
        Ok(())
    }
}

/// Service for judges
pub struct JudgeService {
    judges: Arc<dyn JudgeRepository>,
    courts: Arc<dyn CourtRepository>,
    cases: Arc<dyn CaseRepository>,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for JudgeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeService").finish_non_exhaustive()
    }
}

impl JudgeService {
    pub fn new(
        judges: Arc<dyn JudgeRepository>,
        courts: Arc<dyn CourtRepository>,
        cases: Arc<dyn CaseRepository>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            judges,
            courts,
            cases,
            clock,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewJudge) -> Result<Judge, ApplicationError> {
        if let Some(court_id) = &input.court_id {
            self.ensure_court(court_id).await?;
        }
        let mut judge = Judge::new(input.first_name, input.last_name, self.clock.now());
        judge.court_id = input.court_id;
        judge.appointed_date = input.appointed_date;
        self.judges.insert(&judge).await?;
        info!(judge_id = %judge.id, "Created judge");
        Ok(judge)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &JudgeId) -> Result<Judge, ApplicationError> {
        self.judges
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Judge", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Judge>, ApplicationError> {
        self.judges.list().await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &JudgeId,
        changes: JudgeChanges,
    ) -> Result<Judge, ApplicationError> {
        let mut judge = self.get(id).await?;
        if let Some(court_id) = changes.court_id {
            self.ensure_court(&court_id).await?;
            judge.court_id = Some(court_id);
        }
        if let Some(first_name) = changes.first_name {
            judge.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            judge.last_name = last_name;
        }
        if changes.appointed_date.is_some() {
            judge.appointed_date = changes.appointed_date;
        }
        judge.updated_at = self.clock.now();
        self.judges.update(&judge).await?;
        Ok(judge)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &JudgeId) -> Result<(), ApplicationError> {
        let judge = self.get(id).await?;
        if !self
            .cases
            .list_where(CaseFilter::Judge(judge.id))
            .await?
            .is_empty()
        {
            return Err(ApplicationError::Conflict(format!(
                "judge {id} is presiding over cases"
            )));
        }
        self.judges.delete(id).await?;
        info!(judge_id = %id, "Deleted judge");
        Ok(())
    }

    async fn ensure_court(&self, court_id: &CourtId) -> Result<(), ApplicationError> {
        match self.courts.get(court_id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::not_found("Court", court_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::ports::{
        MockCaseRepository, MockClockPort, MockCourtRepository, MockJudgeRepository,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 4, 10, 0, 0).unwrap()
    }

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now());
        Arc::new(clock)
    }

    #[tokio::test]
    async fn judge_on_unknown_court_is_not_found() {
        let mut courts = MockCourtRepository::new();
        courts.expect_get().returning(|_| Ok(None));
        let mut judges = MockJudgeRepository::new();
        judges.expect_insert().never();

        let service = JudgeService::new(
            Arc::new(judges),
            Arc::new(courts),
            Arc::new(MockCaseRepository::new()),
            clock(),
        );
        let result = service
            .create(NewJudge {
                first_name: "Ruth".into(),
                last_name: "Marsh".into(),
                court_id: Some(CourtId::new()),
                appointed_date: None,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn judge_without_court_is_created() {
        let mut judges = MockJudgeRepository::new();
        judges.expect_insert().times(1).returning(|_| Ok(()));
        let service = JudgeService::new(
            Arc::new(judges),
            Arc::new(MockCourtRepository::new()),
            Arc::new(MockCaseRepository::new()),
            clock(),
        );
        let judge = service
            .create(NewJudge {
                first_name: "Ruth".into(),
                last_name: "Marsh".into(),
                court_id: None,
                appointed_date: None,
            })
            .await
            .unwrap();
        assert_eq!(judge.display_name(), "Hon. Ruth Marsh");
        assert_eq!(judge.created_at, now());
    }

    #[tokio::test]
    async fn court_with_judges_cannot_be_deleted() {
        let court = Court::new("District Court", "Federal", now());
        let id = court.id;
        let mut courts = MockCourtRepository::new();
        courts
            .expect_get()
            .returning(move |_| Ok(Some(court.clone())));
        courts.expect_delete().never();
        let mut judges = MockJudgeRepository::new();
        judges
            .expect_list_by_court()
            .returning(move |_| Ok(vec![Judge::new("A", "B", now()).with_court(id)]));

        let service = CourtService::new(
            Arc::new(courts),
            Arc::new(judges),
            Arc::new(MockCaseRepository::new()),
            clock(),
        );
        let result = service.delete(&id).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[tokio::test]
    async fn unreferenced_court_is_deleted() {
        let court = Court::new("Probate Court", "State", now());
        let id = court.id;
        let mut courts = MockCourtRepository::new();
        courts
            .expect_get()
            .returning(move |_| Ok(Some(court.clone())));
        courts.expect_delete().times(1).returning(|_| Ok(()));
        let mut judges = MockJudgeRepository::new();
        judges.expect_list_by_court().returning(|_| Ok(vec![]));
        let mut cases = MockCaseRepository::new();
        cases.expect_list_where().returning(|_| Ok(vec![]));

        let service = CourtService::new(Arc::new(courts), Arc::new(judges), Arc::new(cases), clock());
        service.delete(&id).await.unwrap();
    }
}
