//! Shared error mapping for the SQLite persistence layer

use application::error::ApplicationError;
use rusqlite::ErrorCode;

use super::connection::DatabaseError;

impl From<DatabaseError> for ApplicationError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::Sqlite(rusqlite::Error::SqliteFailure(failure, message))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::Conflict(message.unwrap_or_else(|| failure.to_string()))
            },
            DatabaseError::NotFound(what) => Self::NotFound(what),
            other => Self::Repository(other.to_string()),
        }
    }
}

/// Map a rusqlite error to an application-layer error
pub fn map_sqlite_error(e: rusqlite::Error) -> ApplicationError {
    DatabaseError::Sqlite(e).into()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn unique_violation_is_conflict() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v TEXT UNIQUE); INSERT INTO t VALUES ('x');")
            .unwrap();
        let err = conn.execute("INSERT INTO t VALUES ('x')", []).unwrap_err();
        assert!(matches!(map_sqlite_error(err), ApplicationError::Conflict(_)));
    }

    #[test]
    fn other_failures_are_repository_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing", []).unwrap_err();
        assert!(matches!(
            map_sqlite_error(err),
            ApplicationError::Repository(_)
        ));
        let err: ApplicationError = DatabaseError::Migration("v9".into()).into();
        assert!(err.to_string().contains("v9"));
    }
}
