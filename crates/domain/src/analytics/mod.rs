//! Case scoring and reporting core
//!
//! Pure functions over [`CaseSnapshot`]s and an explicit `now`. Nothing in
//! here touches storage or the system clock.

pub mod metrics;
pub mod ranking;
pub mod reports;
pub mod scoring;
pub mod snapshot;
pub mod summary;

pub use ranking::{
    attorney_leaderboard, case_outcome_predictions, critical_cases, deadline_performance,
    monthly_trends,
};
pub use reports::{
    AttorneyPerformance, CaseOutcomePrediction, CriticalCase, DeadlinePerformance, MonthlyTrend,
    NO_UPCOMING_DEADLINES, ScoredAttorney,
};
pub use scoring::{CRITICAL_WINDOW_DAYS, PredictedOutcome, RiskFactors, ScoredCase};
pub use snapshot::{AttorneyAggregate, CaseSnapshot, DeadlineSnapshot, UNKNOWN_PARTY};
pub use summary::{DashboardSummary, summary};
