//! Seed Service - development fixtures
//!
//! Writes a small, fixed practice (courts, judges, attorneys, clients, cases,
//! deadlines and documents) dated relative to the given `now`, so every
//! report has something to show. Deadlines cover each state the reports
//! distinguish: overdue, due this week, due later, completed on time and
//! completed late.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use domain::{
    Attorney, BarNumber, Case, CaseNumber, CaseStatus, Client, Court, Deadline, Document,
    EmailAddress, Judge,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, repositories::PracticeRepositories};

/// What a seeding run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// True when data existed and nothing was written
    pub skipped: bool,
    pub courts: usize,
    pub judges: usize,
    pub attorneys: usize,
    pub clients: usize,
    pub cases: usize,
    pub deadlines: usize,
    pub documents: usize,
}

/// (first, last, bar number, specialization, hourly rate, active)
const ATTORNEYS: [(&str, &str, &str, &str, i64, bool); 5] = [
    ("Amara", "Okafor", "NY-204511", "Commercial Litigation", 525, true),
    ("Daniel", "Reyes", "NY-198733", "Employment", 410, true),
    ("Priya", "Natarajan", "NY-221907", "Intellectual Property", 480, true),
    ("Thomas", "Becker", "NJ-087420", "Real Estate", 350, true),
    ("Helen", "Marsh", "NY-150266", "Family Law", 300, false),
];

/// (first, last, email, company)
const CLIENTS: [(&str, &str, &str, Option<&str>); 6] = [
    ("Wei", "Lin", "wei.lin@lintrading.com", Some("Lin Trading Co.")),
    ("Sofia", "Alvarez", "sofia.alvarez@example.com", None),
    ("Marcus", "Grant", "m.grant@northbridge.io", Some("Northbridge Analytics")),
    ("Elena", "Petrova", "elena.petrova@example.com", None),
    ("James", "O'Neill", "jim@oneillbuilders.com", Some("O'Neill Builders LLC")),
    ("Grace", "Kim", "grace.kim@example.com", None),
];

/// (number, title, type, status, filed days ago, value, client, attorney)
#[allow(clippy::type_complexity)]
const CASES: [(&str, &str, &str, CaseStatus, i64, Option<i64>, usize, usize); 12] = [
    ("CV-2024-0101", "Lin Trading v. Harbor Freight Lines", "Commercial", CaseStatus::Active, 420, Some(1_850_000), 0, 0),
    ("CV-2024-0117", "Alvarez v. Metro Transit Authority", "Employment", CaseStatus::Active, 200, Some(240_000), 1, 1),
    ("IP-2024-0032", "Northbridge v. DataCrest", "Intellectual Property", CaseStatus::Open, 95, Some(3_200_000), 2, 2),
    ("CV-2024-0150", "Petrova Custody Matter", "Family", CaseStatus::Pending, 150, Some(15_000), 3, 4),
    ("RE-2024-0009", "O'Neill Builders Lien Dispute", "Real Estate", CaseStatus::Active, 60, Some(410_000), 4, 3),
    ("CV-2023-0877", "Kim v. Lakeside Apartments", "Real Estate", CaseStatus::Closed, 510, Some(85_000), 5, 3),
    ("CV-2023-0902", "Lin Trading Contract Review", "Commercial", CaseStatus::Closed, 330, Some(120_000), 0, 0),
    ("EM-2024-0044", "Alvarez Wage Claim", "Employment", CaseStatus::OnHold, 250, None, 1, 1),
    ("IP-2024-0051", "Northbridge Trademark Opposition", "Intellectual Property", CaseStatus::Active, 30, Some(95_000), 2, 2),
    ("CV-2024-0188", "Grant Shareholder Demand", "Commercial", CaseStatus::Open, 12, Some(760_000), 2, 0),
    ("CV-2023-0799", "Petrova Estate Settlement", "Probate", CaseStatus::Closed, 600, Some(45_000), 3, 1),
    ("RE-2024-0015", "Kim Easement Claim", "Real Estate", CaseStatus::Active, 5, None, 5, 3),
];

/// (case index, title, due in days, completed days relative to due, critical)
const DEADLINES: [(usize, &str, i64, Option<i64>, bool); 16] = [
    (0, "Expert report due", -12, None, true),
    (0, "Opposition to summary judgment", 3, None, true),
    (0, "Initial disclosures", -300, Some(-2), false),
    (1, "Deposition of HR director", 5, None, false),
    (1, "Answer to counterclaim", -150, Some(4), true),
    (2, "Claim construction brief", 2, None, true),
    (2, "Document production", -4, None, false),
    (2, "Infringement contentions", -30, Some(0), true),
    (3, "Guardian ad litem report", 20, None, false),
    (4, "Mechanic's lien filing", -1, None, true),
    (4, "Site inspection", 45, None, false),
    (5, "Settlement payment", -90, Some(-10), false),
    (6, "Redline delivery", -200, Some(1), false),
    (8, "Response to office action", 6, None, true),
    (9, "Books and records inspection", 14, None, false),
    (10, "Final accounting", -400, Some(-5), false),
];

pub struct SeedService {
    repos: PracticeRepositories,
}

impl std::fmt::Debug for SeedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedService").finish_non_exhaustive()
    }
}

impl SeedService {
    #[must_use]
    pub const fn new(repos: PracticeRepositories) -> Self {
        Self { repos }
    }

    /// Insert the fixture set unless attorneys already exist
    ///
    /// With `force`, existing records are removed first.
    #[instrument(skip(self))]
    pub async fn seed(&self, now: DateTime<Utc>, force: bool) -> Result<SeedReport, ApplicationError> {
        if !self.repos.attorneys.list().await?.is_empty() {
            if !force {
                info!("Practice already has data, skipping seed");
                return Ok(SeedReport {
                    skipped: true,
                    ..SeedReport::default()
                });
            }
            warn!("Removing existing records before seeding");
            self.purge().await?;
        }

        let mut report = SeedReport::default();

        let courts = [
            Court::new("Supreme Court of New York County", "New York", now)
                .with_court_type("State Trial"),
            Court::new("U.S. District Court, S.D.N.Y.", "Federal", now)
                .with_court_type("Federal District"),
            Court::new("Superior Court of New Jersey", "New Jersey", now)
                .with_court_type("State Trial"),
        ];
        for court in &courts {
            self.repos.courts.insert(court).await?;
        }
        report.courts = courts.len();

        let judges = [
            Judge::new("Margaret", "Holloway", now).with_court(courts[0].id),
            Judge::new("Raymond", "Cho", now).with_court(courts[1].id),
            Judge::new("Alicia", "Fernandez", now).with_court(courts[1].id),
            Judge::new("Owen", "Price", now).with_court(courts[2].id),
        ];
        for judge in &judges {
            self.repos.judges.insert(judge).await?;
        }
        report.judges = judges.len();

        let mut attorneys = Vec::with_capacity(ATTORNEYS.len());
        for (i, (first, last, bar, specialization, rate, active)) in ATTORNEYS.iter().enumerate() {
            let email = EmailAddress::new(format!(
                "{}.{}@caseledger.law",
                first.to_lowercase(),
                last.to_lowercase()
            ))?;
            let mut attorney = Attorney::new(*first, *last, BarNumber::new(*bar)?, email, now)
                .with_specialization(*specialization)
                .with_hourly_rate(Decimal::from(*rate))
                .with_hire_date(hire_date(now, i));
            attorney.is_active = *active;
            self.repos.attorneys.insert(&attorney).await?;
            attorneys.push(attorney);
        }
        report.attorneys = attorneys.len();

        let mut clients = Vec::with_capacity(CLIENTS.len());
        for (first, last, email, company) in CLIENTS {
            let mut client = Client::new(first, last, EmailAddress::new(email)?, now);
            if let Some(company) = company {
                client = client.with_company(company);
            }
            self.repos.clients.insert(&client).await?;
            clients.push(client);
        }
        report.clients = clients.len();

        let mut cases = Vec::with_capacity(CASES.len());
        for (i, (number, title, case_type, status, filed_ago, value, client, attorney)) in
            CASES.into_iter().enumerate()
        {
            let filed = now - Duration::days(filed_ago);
            let mut case = Case::new(
                CaseNumber::new(number)?,
                title,
                clients[client].id,
                attorneys[attorney].id,
                filed,
            )
            .with_case_type(case_type);
            case.estimated_value = value.map(Decimal::from);
            let court = &courts[i % courts.len()];
            let judge = judges.iter().find(|j| j.court_id == Some(court.id));
            case = case.with_court(court.id, judge.map(|j| j.id));
            if status != CaseStatus::Active {
                // status changes land a month back, never before filing
                case.transition_to(status, (now - Duration::days(30)).max(filed));
            }
            self.repos.cases.insert(&case).await?;
            cases.push(case);
        }
        report.cases = cases.len();

        for (case_index, title, due_in, completed_offset, critical) in DEADLINES {
            let due = now + Duration::days(due_in);
            let mut deadline = Deadline::new(cases[case_index].id, title, due, now);
            deadline.is_critical = critical;
            if let Some(offset) = completed_offset {
                deadline.complete(due + Duration::days(offset));
            }
            self.repos.deadlines.insert(&deadline).await?;
            report.deadlines += 1;
        }

        for case in &cases {
            let mut complaint =
                Document::new(case.id, format!("{} - Complaint", case.title), case.filing_date)
                    .with_document_type("Pleading");
            complaint.file_path = Some(format!("/documents/{}/complaint.pdf", case.case_number));
            self.repos.documents.insert(&complaint).await?;
            report.documents += 1;

            if case.status.is_closed() {
                let settlement = Document::new(case.id, "Settlement Agreement", now)
                    .with_document_type("Agreement");
                self.repos.documents.insert(&settlement).await?;
                report.documents += 1;
            }
        }

        info!(
            cases = report.cases,
            deadlines = report.deadlines,
            documents = report.documents,
            "Seeded practice"
        );
        Ok(report)
    }

    /// Delete every record, children before parents
    async fn purge(&self) -> Result<(), ApplicationError> {
        for case in self.repos.cases.list().await? {
            self.repos.documents.delete_by_case(&case.id).await?;
            self.repos.deadlines.delete_by_case(&case.id).await?;
            self.repos.cases.delete(&case.id).await?;
        }
        for judge in self.repos.judges.list().await? {
            self.repos.judges.delete(&judge.id).await?;
        }
        for court in self.repos.courts.list().await? {
            self.repos.courts.delete(&court.id).await?;
        }
        for client in self.repos.clients.list().await? {
            self.repos.clients.delete(&client.id).await?;
        }
        for attorney in self.repos.attorneys.list().await? {
            self.repos.attorneys.delete(&attorney.id).await?;
        }
        Ok(())
    }
}

/// Staggered hire dates, one to five years back
fn hire_date(now: DateTime<Utc>, index: usize) -> NaiveDate {
    let years_back = i64::try_from(index).unwrap_or(0) + 1;
    (now - Duration::days(365 * years_back)).date_naive()
}
