//! Reporting Service - dashboard reports over a fresh snapshot
//!
//! Each call reads the current state of the practice, takes `now` from the
//! clock once, and hands both to the analytics core.

use std::sync::Arc;

use domain::analytics::{
    self, AttorneyPerformance, CaseOutcomePrediction, CriticalCase, DashboardSummary,
    DeadlinePerformance, MonthlyTrend,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::snapshot_builder::{PracticeSnapshot, SnapshotBuilder};
use crate::{error::ApplicationError, ports::ClockPort};

const DEFAULT_CRITICAL_CASE_LIMIT: usize = 10;
const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Tunables for report endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Critical cases returned when the caller gives no limit
    #[serde(default = "default_critical_case_limit")]
    pub critical_case_limit: usize,

    /// Monthly trend window when the caller gives none (`None` = all history)
    #[serde(default)]
    pub default_trend_months: Option<u32>,

    /// Window of the upcoming-deadlines listing when the caller gives none
    #[serde(default = "default_upcoming_days")]
    pub upcoming_default_days: i64,
}

const fn default_critical_case_limit() -> usize {
    DEFAULT_CRITICAL_CASE_LIMIT
}

const fn default_upcoming_days() -> i64 {
    DEFAULT_UPCOMING_DAYS
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            critical_case_limit: default_critical_case_limit(),
            default_trend_months: None,
            upcoming_default_days: default_upcoming_days(),
        }
    }
}

pub struct ReportingService {
    snapshots: SnapshotBuilder,
    clock: Arc<dyn ClockPort>,
    config: ReportingConfig,
}

impl std::fmt::Debug for ReportingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportingService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReportingService {
    #[must_use]
    pub fn new(snapshots: SnapshotBuilder, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            snapshots,
            clock,
            config: ReportingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ReportingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ReportingConfig {
        &self.config
    }

    /// Attorney leaderboard by total case value
    #[instrument(skip(self))]
    pub async fn attorney_performance(&self) -> Result<Vec<AttorneyPerformance>, ApplicationError> {
        let snapshot = self.snapshot().await?;
        let rows = analytics::attorney_leaderboard(&snapshot.attorneys, self.clock.now());
        debug!(rows = rows.len(), "Attorney performance report");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn case_predictions(&self) -> Result<Vec<CaseOutcomePrediction>, ApplicationError> {
        let snapshot = self.snapshot().await?;
        let rows = analytics::case_outcome_predictions(&snapshot.cases, self.clock.now());
        debug!(rows = rows.len(), "Case prediction report");
        Ok(rows)
    }

    /// Most urgent open cases; `limit` falls back to the configured default
    #[instrument(skip(self))]
    pub async fn critical_cases(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<CriticalCase>, ApplicationError> {
        let limit = limit.unwrap_or(self.config.critical_case_limit);
        let snapshot = self.snapshot().await?;
        let rows = analytics::critical_cases(&snapshot.cases, self.clock.now(), Some(limit));
        debug!(rows = rows.len(), limit, "Critical case report");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn monthly_trends(
        &self,
        months: Option<u32>,
    ) -> Result<Vec<MonthlyTrend>, ApplicationError> {
        let months = months.or(self.config.default_trend_months);
        let snapshot = self.snapshot().await?;
        let rows = analytics::monthly_trends(&snapshot.cases, self.clock.now(), months);
        debug!(rows = rows.len(), "Monthly trend report");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn deadline_performance(
        &self,
    ) -> Result<Vec<DeadlinePerformance>, ApplicationError> {
        let snapshot = self.snapshot().await?;
        let rows = analytics::deadline_performance(&snapshot.cases, self.clock.now());
        debug!(rows = rows.len(), "Deadline performance report");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApplicationError> {
        let snapshot = self.snapshot().await?;
        Ok(analytics::summary(
            &snapshot.cases,
            &snapshot.attorneys,
            snapshot.client_count,
            self.clock.now(),
        ))
    }

    async fn snapshot(&self) -> Result<PracticeSnapshot, ApplicationError> {
        self.snapshots.build().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use domain::{Attorney, BarNumber, Case, CaseNumber, CaseStatus, ClientId, Deadline, EmailAddress};
    use rust_decimal::Decimal;

    use super::*;
    use crate::ports::{
        MockAttorneyRepository, MockCaseRepository, MockClientRepository, MockClockPort,
        MockCourtRepository, MockDeadlineRepository, MockDocumentRepository, MockJudgeRepository,
    };
    use crate::repositories::PracticeRepositories;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 15, 9, 0, 0).unwrap()
    }

    /// Two attorneys; the first holds three urgent cases, the second one closed case
    fn service() -> ReportingService {
        let lead = Attorney::new(
            "Ada",
            "Okafor",
            BarNumber::new("NY-1").unwrap(),
            EmailAddress::new("ada@firm.law").unwrap(),
            now(),
        );
        let partner = Attorney::new(
            "Ben",
            "Stone",
            BarNumber::new("NY-2").unwrap(),
            EmailAddress::new("ben@firm.law").unwrap(),
            now(),
        );

        let mut cases = Vec::new();
        let mut deadlines = Vec::new();
        for i in 0..3 {
            let case = Case::new(
                CaseNumber::new(format!("CV-{i}")).unwrap(),
                format!("Matter {i}"),
                ClientId::new(),
                lead.id,
                now() - Duration::days(40 * (i + 1)),
            )
            .with_estimated_value(Decimal::from(100_000 * (i + 1)));
            deadlines.push(Deadline::new(case.id, "Reply", now() + Duration::days(i + 1), now()));
            cases.push(case);
        }
        cases.push(
            Case::new(
                CaseNumber::new("CV-9").unwrap(),
                "Settled",
                ClientId::new(),
                partner.id,
                now() - Duration::days(400),
            )
            .with_status(CaseStatus::Closed)
            .with_estimated_value(Decimal::from(1_000)),
        );

        let mut case_repo = MockCaseRepository::new();
        case_repo.expect_list().returning(move || Ok(cases.clone()));
        let mut client_repo = MockClientRepository::new();
        client_repo.expect_list().returning(|| Ok(vec![]));
        let attorneys = vec![lead, partner];
        let mut attorney_repo = MockAttorneyRepository::new();
        attorney_repo
            .expect_list()
            .returning(move || Ok(attorneys.clone()));
        let mut deadline_repo = MockDeadlineRepository::new();
        deadline_repo
            .expect_list()
            .returning(move || Ok(deadlines.clone()));
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now());

        let builder = SnapshotBuilder::new(PracticeRepositories {
            attorneys: Arc::new(attorney_repo),
            judges: Arc::new(MockJudgeRepository::new()),
            clients: Arc::new(client_repo),
            courts: Arc::new(MockCourtRepository::new()),
            cases: Arc::new(case_repo),
            deadlines: Arc::new(deadline_repo),
            documents: Arc::new(MockDocumentRepository::new()),
        });
        ReportingService::new(builder, Arc::new(clock))
    }

    #[tokio::test]
    async fn leaderboard_ranks_by_revenue() {
        let rows = service().attorney_performance().await.unwrap();
        assert_eq!(rows[0].attorney_name, "Ada Okafor");
        assert_eq!(rows[0].total_revenue, Decimal::from(600_000));
        assert_eq!(rows[1].completed_cases, 1);
        assert_eq!(rows[1].rank, 2);
    }

    #[tokio::test]
    async fn critical_cases_use_configured_limit() {
        let service = service().with_config(ReportingConfig {
            critical_case_limit: 2,
            ..ReportingConfig::default()
        });
        assert_eq!(service.critical_cases(None).await.unwrap().len(), 2);
        assert_eq!(service.critical_cases(Some(10)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn critical_cases_rank_by_priority() {
        let rows = service().critical_cases(None).await.unwrap();
        // 50 for proximity + 25 for value beats the nearer but smaller CV-0
        assert_eq!(rows[0].case_number, "CV-1");
        assert_eq!(rows[0].days_until_deadline, Some(2));
        assert_eq!(rows[2].case_number, "CV-0");
        assert_eq!(rows[0].client_name, "Unknown");
    }

    #[tokio::test]
    async fn predictions_skip_closed_cases() {
        let rows = service().case_predictions().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.status == CaseStatus::Active));
    }

    #[tokio::test]
    async fn trends_respect_window() {
        let all = service().monthly_trends(None).await.unwrap();
        let recent = service().monthly_trends(Some(2)).await.unwrap();
        assert!(recent.len() < all.len());
        assert!(recent.iter().all(|t| t.year == 2024 && t.month >= 10));
    }

    #[tokio::test]
    async fn summary_counts_pipeline() {
        let summary = service().dashboard_summary().await.unwrap();
        assert_eq!(summary.total_cases, 4);
        assert_eq!(summary.closed_cases, 1);
        assert_eq!(summary.upcoming_deadlines, 3);
        assert_eq!(summary.critical_cases, 3);
        assert_eq!(summary.total_pipeline_value, Decimal::from(600_000));
    }

    #[test]
    fn config_defaults() {
        let config: ReportingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReportingConfig::default());
        assert_eq!(config.critical_case_limit, 10);
        assert_eq!(config.upcoming_default_days, 7);
    }
}
