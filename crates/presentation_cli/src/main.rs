//! CaseLedger CLI
//!
//! Administration commands that work directly against the configured store.

#![allow(clippy::print_stdout)]

mod backup;
mod report;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use application::{ReportingService, SeedService, SnapshotBuilder, ports::ClockPort};
use clap::{Parser, Subcommand};
use infrastructure::{
    AppConfig, DatabaseConfig, StorageBackend, SystemClock, create_pool, init_logging,
    open_storage, persistence::migrations,
};
use tracing::info;

use crate::report::{ReportKind, ReportOptions, run_report};

/// CaseLedger CLI
#[derive(Debug, Parser)]
#[command(name = "caseledger-cli")]
#[command(author, version, about = "CaseLedger practice administration", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the sample practice (courts, attorneys, clients, cases...)
    ///
    /// Does nothing when attorneys already exist unless --force is given.
    Seed {
        /// Delete existing records first
        #[arg(long)]
        force: bool,
    },

    /// Print a report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        /// Emit JSON instead of text rows
        #[arg(long)]
        json: bool,

        /// Maximum rows of the critical-cases report
        #[arg(long)]
        limit: Option<usize>,

        /// Trailing months of the monthly-trends report
        #[arg(long)]
        months: Option<u32>,
    },

    /// Apply pending schema migrations to the SQLite database
    Migrate,

    /// Create an online backup of the SQLite database
    ///
    /// Example: caseledger-cli backup --output ./backups/practice.db
    Backup {
        /// Output path for the backup file (timestamped name if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn require_sqlite(database: &DatabaseConfig, command: &str) -> anyhow::Result<()> {
    if database.backend != StorageBackend::Sqlite {
        bail!(
            "'{command}' needs the sqlite backend, database.backend is '{}'",
            database.backend
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging("text", log_filter_from_verbosity(cli.verbose))?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    match cli.command {
        Commands::Seed { force } => {
            let storage = open_storage(&config.database)?;
            let report = SeedService::new(storage.repositories)
                .seed(clock.now(), force)
                .await?;
            if report.skipped {
                println!("Practice already has data; use --force to replace it");
            } else {
                println!(
                    "Seeded {} courts, {} judges, {} attorneys, {} clients, {} cases, {} deadlines, {} documents",
                    report.courts,
                    report.judges,
                    report.attorneys,
                    report.clients,
                    report.cases,
                    report.deadlines,
                    report.documents,
                );
            }
        },

        Commands::Report {
            kind,
            json,
            limit,
            months,
        } => {
            let storage = open_storage(&config.database)?;
            let service = ReportingService::new(SnapshotBuilder::new(storage.repositories), clock)
                .with_config(config.reporting.to_reporting_config());
            let output = run_report(&service, kind, ReportOptions { json, limit, months }).await?;
            println!("{output}");
        },

        Commands::Migrate => {
            require_sqlite(&config.database, "migrate")?;
            let pool = create_pool(&DatabaseConfig {
                run_migrations: true,
                ..config.database.clone()
            })?;
            let conn = pool.get()?;
            let version = migrations::schema_version(&conn)?;
            info!(version, path = %config.database.path, "Migrations applied");
            println!("Schema at version {version} ({})", config.database.path);
        },

        Commands::Backup { output } => {
            require_sqlite(&config.database, "backup")?;
            let result =
                backup::backup_database(&PathBuf::from(&config.database.path), output).await?;
            println!(
                "Backup written to {} ({} bytes, {} ms)",
                result.local_path.display(),
                result.size_bytes,
                result.duration_ms
            );
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn seed_force_flag() {
        let cli = parse(&["caseledger-cli", "seed", "--force"]);
        assert!(matches!(cli.command, Commands::Seed { force: true }));
        let cli = parse(&["caseledger-cli", "seed"]);
        assert!(matches!(cli.command, Commands::Seed { force: false }));
    }

    #[test]
    fn report_kinds_are_kebab_case() {
        let cli = parse(&["caseledger-cli", "report", "critical-cases", "--limit", "3", "--json"]);
        let Commands::Report {
            kind, json, limit, ..
        } = cli.command
        else {
            unreachable!("Expected Report");
        };
        assert_eq!(kind, ReportKind::CriticalCases);
        assert!(json);
        assert_eq!(limit, Some(3));
    }

    #[test]
    fn unknown_report_is_rejected() {
        assert!(Cli::try_parse_from(["caseledger-cli", "report", "revenue"]).is_err());
    }

    #[test]
    fn verbosity_is_global() {
        let cli = parse(&["caseledger-cli", "migrate", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(log_filter_from_verbosity(cli.verbose), "debug");
    }

    #[test]
    fn memory_backend_cannot_migrate() {
        let database = DatabaseConfig {
            backend: StorageBackend::Memory,
            ..DatabaseConfig::default()
        };
        assert!(require_sqlite(&database, "migrate").is_err());
        assert!(require_sqlite(&DatabaseConfig::default(), "migrate").is_ok());
    }
}
