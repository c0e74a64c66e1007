//! Report rendering for the terminal
//!
//! Each report is printed either as pretty JSON or as aligned text rows.

use anyhow::Result;
use application::ReportingService;
use clap::ValueEnum;
use domain::analytics::{
    AttorneyPerformance, CaseOutcomePrediction, CriticalCase, DashboardSummary,
    DeadlinePerformance, MonthlyTrend,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Report selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    AttorneyPerformance,
    CasePredictions,
    CriticalCases,
    MonthlyTrends,
    DeadlinePerformance,
    Summary,
}

/// Knobs shared by the report subcommand
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub json: bool,
    pub limit: Option<usize>,
    pub months: Option<u32>,
}

/// Run one report and render it
pub async fn run_report(
    service: &ReportingService,
    kind: ReportKind,
    options: ReportOptions,
) -> Result<String> {
    let rendered = match kind {
        ReportKind::AttorneyPerformance => {
            let rows = service.attorney_performance().await?;
            render(rows.as_slice(), options.json, render_attorneys)?
        },
        ReportKind::CasePredictions => {
            let rows = service.case_predictions().await?;
            render(rows.as_slice(), options.json, render_predictions)?
        },
        ReportKind::CriticalCases => {
            let rows = service.critical_cases(options.limit).await?;
            render(rows.as_slice(), options.json, render_critical)?
        },
        ReportKind::MonthlyTrends => {
            let rows = service.monthly_trends(options.months).await?;
            render(rows.as_slice(), options.json, render_trends)?
        },
        ReportKind::DeadlinePerformance => {
            let rows = service.deadline_performance().await?;
            render(rows.as_slice(), options.json, render_deadlines)?
        },
        ReportKind::Summary => {
            let summary = service.dashboard_summary().await?;
            render(&summary, options.json, render_summary)?
        },
    };
    Ok(rendered)
}

fn render<T: Serialize + ?Sized>(
    value: &T,
    json: bool,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

fn money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.round_dp(2).to_string())
}

fn lines<T>(rows: &[T], empty: &str, line: impl Fn(&T) -> String) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }
    rows.iter().map(line).collect::<Vec<_>>().join("\n")
}

fn render_attorneys(rows: &[AttorneyPerformance]) -> String {
    lines(rows, "No attorneys", |r| {
        format!(
            "{:>3}. {:<28} {:<12} revenue {:>14}  closed {:>3}  active {:>3}  overdue {:>3}  score {:>5}",
            r.rank,
            r.attorney_name,
            r.bar_number,
            money(Some(r.total_revenue)),
            r.completed_cases,
            r.active_cases,
            r.overdue_deadlines,
            r.performance_score,
        )
    })
}

fn render_predictions(rows: &[CaseOutcomePrediction]) -> String {
    lines(rows, "No open cases", |r| {
        format!(
            "{:<14} {:<15} risk {:>6.1}  age {:>5}d  overdue {:>2}  {}",
            r.case_number, r.predicted_outcome, r.risk_score, r.case_age_days, r.overdue_deadlines, r.case_title,
        )
    })
}

fn render_critical(rows: &[CriticalCase]) -> String {
    lines(rows, "No critical cases", |r| {
        let due = r
            .days_until_deadline
            .map_or_else(String::new, |d| format!(" (in {d}d)"));
        format!(
            "{:<14} priority {:>6.1}  overdue {:>2}  next: {}{}  [{}]",
            r.case_number, r.priority_score, r.overdue_deadlines, r.next_deadline, due, r.client_name,
        )
    })
}

fn render_trends(rows: &[MonthlyTrend]) -> String {
    lines(rows, "No cases in range", |r| {
        format!(
            "{}  new {:>3}  revenue {:>14}  avg {:>12}",
            r.period,
            r.new_cases,
            money(Some(r.total_revenue)),
            money(Some(r.avg_case_value)),
        )
    })
}

fn render_deadlines(rows: &[DeadlinePerformance]) -> String {
    lines(rows, "No deadlines", |r| {
        format!(
            "{:<14} total {:>3}  on time {:>3}  late {:>3}  pending {:>3}  overdue {:>3}  {:>5.1}%",
            r.case_number,
            r.total_deadlines,
            r.completed_on_time,
            r.completed_late,
            r.still_pending,
            r.overdue,
            r.on_time_percentage,
        )
    })
}

fn render_summary(s: &DashboardSummary) -> String {
    [
        format!("Cases:              {} ({} active, {} closed)", s.total_cases, s.active_cases, s.closed_cases),
        format!("Clients:            {}", s.total_clients),
        format!("Active attorneys:   {}", s.active_attorneys),
        format!("Upcoming deadlines: {}", s.upcoming_deadlines),
        format!("Overdue deadlines:  {}", s.overdue_deadlines),
        format!("Critical cases:     {}", s.critical_cases),
        format!("Pipeline value:     {}", money(Some(s.total_pipeline_value))),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use application::{SeedService, SnapshotBuilder, ports::ClockPort};
    use chrono::{TimeZone, Utc};
    use infrastructure::{FixedClock, InMemoryPracticeStore};

    use super::*;

    async fn seeded_service() -> ReportingService {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        let repos =
            application::PracticeRepositories::from_store(Arc::new(InMemoryPracticeStore::new()));
        SeedService::new(repos.clone()).seed(now, false).await.unwrap();
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock::new(now));
        ReportingService::new(SnapshotBuilder::new(repos), clock)
    }

    #[tokio::test]
    async fn json_output_parses_back() {
        let service = seeded_service().await;
        let out = run_report(
            &service,
            ReportKind::AttorneyPerformance,
            ReportOptions {
                json: true,
                ..ReportOptions::default()
            },
        )
        .await
        .unwrap();
        let rows: Vec<AttorneyPerformance> = serde_json::from_str(&out).unwrap();
        assert_eq!(rows[0].rank, 1);
    }

    #[tokio::test]
    async fn critical_limit_reaches_service() {
        let service = seeded_service().await;
        let out = run_report(
            &service,
            ReportKind::CriticalCases,
            ReportOptions {
                json: true,
                limit: Some(1),
                months: None,
            },
        )
        .await
        .unwrap();
        let rows: Vec<CriticalCase> = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn text_summary_lists_headline_figures() {
        let service = seeded_service().await;
        let out = run_report(&service, ReportKind::Summary, ReportOptions::default())
            .await
            .unwrap();
        assert!(out.contains("Cases:"));
        assert!(out.contains("Pipeline value:"));
    }

    #[test]
    fn empty_reports_say_so() {
        assert_eq!(render_trends(&[]), "No cases in range");
        assert_eq!(render_critical(&[]), "No critical cases");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(money(Some(Decimal::new(123_456, 3))), "123.46");
        assert_eq!(money(None), "-");
    }
}
