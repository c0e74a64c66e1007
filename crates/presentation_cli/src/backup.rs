//! SQLite database backup
//!
//! Online copy of the practice database through SQLite's backup API. The
//! source is opened read-only, so a running server is not disturbed.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, backup};
use tracing::{debug, info};

/// Result of a backup operation
#[derive(Debug)]
pub struct BackupResult {
    pub local_path: PathBuf,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

/// `caseledger_backup_YYYYmmdd_HHMMSS.db`
pub fn default_backup_name(at: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!(
        "caseledger_backup_{}.db",
        at.format("%Y%m%d_%H%M%S")
    ))
}

/// Copy `source_db_path` to `output_path` (or a timestamped file)
pub async fn backup_database(
    source_db_path: &Path,
    output_path: Option<PathBuf>,
) -> Result<BackupResult> {
    if !source_db_path.exists() {
        bail!("Database {} does not exist", source_db_path.display());
    }
    let start = Instant::now();
    let backup_path = output_path.unwrap_or_else(|| default_backup_name(Utc::now()));

    info!(
        source = %source_db_path.display(),
        destination = %backup_path.display(),
        "Starting SQLite online backup"
    );

    perform_sqlite_backup(source_db_path, &backup_path)
        .await
        .context("SQLite backup failed")?;

    let size_bytes = tokio::fs::metadata(&backup_path)
        .await
        .context("Failed to get backup file metadata")?
        .len();

    #[allow(clippy::cast_possible_truncation)]
    let duration_ms = start.elapsed().as_millis() as u64;
    info!(size_bytes, duration_ms, "Backup completed");

    Ok(BackupResult {
        local_path: backup_path,
        size_bytes,
        duration_ms,
    })
}

async fn perform_sqlite_backup(source_path: &Path, dest_path: &Path) -> Result<()> {
    let source_path = source_path.to_path_buf();
    let dest_path = dest_path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let source_conn = Connection::open_with_flags(
            &source_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open source database")?;
        let mut dest_conn = Connection::open(&dest_path).context("Failed to create backup file")?;

        {
            let backup = backup::Backup::new(&source_conn, &mut dest_conn)
                .context("Failed to initialize backup")?;
            // -1 copies every page in one step
            backup.step(-1).context("Backup step failed")?;
            debug!("Backup pages copied");
        }

        dest_conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close backup file")?;
        Ok(())
    })
    .await
    .context("Backup task panicked")?
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use infrastructure::{DatabaseConfig, StorageBackend, create_pool};

    use super::*;

    #[test]
    fn backup_name_is_timestamped() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 23, 5, 9).unwrap();
        assert_eq!(
            default_backup_name(at),
            PathBuf::from("caseledger_backup_20240229_230509.db")
        );
    }

    #[tokio::test]
    async fn copies_migrated_database() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("practice.db");
        let config = DatabaseConfig {
            backend: StorageBackend::Sqlite,
            path: source.to_string_lossy().into_owned(),
            max_connections: 1,
            run_migrations: true,
        };
        drop(create_pool(&config).unwrap());

        let target = dir.path().join("copy.db");
        let result = backup_database(&source, Some(target.clone())).await.unwrap();

        assert_eq!(result.local_path, target);
        assert!(result.size_bytes > 0);
        let copy = Connection::open(&target).unwrap();
        let tables: i64 = copy
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'cases'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = backup_database(&dir.path().join("absent.db"), None).await;
        assert!(result.is_err());
    }
}
