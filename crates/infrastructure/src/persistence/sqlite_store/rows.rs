//! Column codecs shared by the table modules

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use domain::{
    Attorney, AttorneyId, BarNumber, Case, CaseId, CaseNumber, CaseStatus, Client, ClientId, Court,
    CourtId, Deadline, DeadlineId, Document, DocumentId, EmailAddress, Judge, JudgeId,
};
use rust_decimal::Decimal;
use rusqlite::{Row, types::Type};

pub const ATTORNEY_COLUMNS: &str = "id, first_name, last_name, bar_number, email, phone, \
     specialization, hire_date, hourly_rate, is_active, created_at, updated_at";

pub const JUDGE_COLUMNS: &str =
    "id, first_name, last_name, court_id, appointed_date, created_at, updated_at";

pub const CLIENT_COLUMNS: &str = "id, first_name, last_name, email, phone, address, \
     company_name, created_at, updated_at";

pub const COURT_COLUMNS: &str =
    "id, name, jurisdiction, address, court_type, created_at, updated_at";

pub const CASE_COLUMNS: &str = "id, case_number, title, description, status, case_type, \
     filing_date, closed_date, estimated_value, client_id, attorney_id, court_id, judge_id, \
     created_at, updated_at";

pub const DEADLINE_COLUMNS: &str = "id, case_id, title, description, due_date, is_completed, \
     completed_date, is_critical, created_at, updated_at";

pub const DOCUMENT_COLUMNS: &str =
    "id, case_id, title, document_type, file_path, uploaded_at, created_at, updated_at";

fn conversion<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

/// Read a TEXT column and parse it
fn parsed<T, E>(row: &Row<'_>, idx: usize, parse: impl FnOnce(&str) -> Result<T, E>) -> rusqlite::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    parse(&raw).map_err(|e| conversion(idx, e))
}

/// Read a nullable TEXT column and parse it
fn parsed_opt<T, E>(
    row: &Row<'_>,
    idx: usize,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> rusqlite::Result<Option<T>>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| parse(&s).map_err(|e| conversion(idx, e)))
        .transpose()
}

fn timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

fn date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn ts(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub fn ts_opt(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(ts)
}

pub fn date_text(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn decimal_opt(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

pub fn row_to_attorney(row: &Row<'_>) -> rusqlite::Result<Attorney> {
    Ok(Attorney {
        id: parsed(row, 0, AttorneyId::parse)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        bar_number: parsed(row, 3, |s| BarNumber::new(s))?,
        email: parsed(row, 4, |s| EmailAddress::new(s))?,
        phone: row.get(5)?,
        specialization: row.get(6)?,
        hire_date: parsed(row, 7, date)?,
        hourly_rate: parsed_opt(row, 8, Decimal::from_str)?,
        is_active: row.get(9)?,
        created_at: parsed(row, 10, timestamp)?,
        updated_at: parsed(row, 11, timestamp)?,
    })
}

pub fn row_to_judge(row: &Row<'_>) -> rusqlite::Result<Judge> {
    Ok(Judge {
        id: parsed(row, 0, JudgeId::parse)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        court_id: parsed_opt(row, 3, CourtId::parse)?,
        appointed_date: parsed_opt(row, 4, date)?,
        created_at: parsed(row, 5, timestamp)?,
        updated_at: parsed(row, 6, timestamp)?,
    })
}

pub fn row_to_client(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: parsed(row, 0, ClientId::parse)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: parsed(row, 3, |s| EmailAddress::new(s))?,
        phone: row.get(4)?,
        address: row.get(5)?,
        company_name: row.get(6)?,
        created_at: parsed(row, 7, timestamp)?,
        updated_at: parsed(row, 8, timestamp)?,
    })
}

pub fn row_to_court(row: &Row<'_>) -> rusqlite::Result<Court> {
    Ok(Court {
        id: parsed(row, 0, CourtId::parse)?,
        name: row.get(1)?,
        jurisdiction: row.get(2)?,
        address: row.get(3)?,
        court_type: row.get(4)?,
        created_at: parsed(row, 5, timestamp)?,
        updated_at: parsed(row, 6, timestamp)?,
    })
}

pub fn row_to_case(row: &Row<'_>) -> rusqlite::Result<Case> {
    Ok(Case {
        id: parsed(row, 0, CaseId::parse)?,
        case_number: parsed(row, 1, |s| CaseNumber::new(s))?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: parsed(row, 4, CaseStatus::from_str)?,
        case_type: row.get(5)?,
        filing_date: parsed(row, 6, timestamp)?,
        closed_date: parsed_opt(row, 7, timestamp)?,
        estimated_value: parsed_opt(row, 8, Decimal::from_str)?,
        client_id: parsed(row, 9, ClientId::parse)?,
        attorney_id: parsed(row, 10, AttorneyId::parse)?,
        court_id: parsed_opt(row, 11, CourtId::parse)?,
        judge_id: parsed_opt(row, 12, JudgeId::parse)?,
        created_at: parsed(row, 13, timestamp)?,
        updated_at: parsed(row, 14, timestamp)?,
    })
}

pub fn row_to_deadline(row: &Row<'_>) -> rusqlite::Result<Deadline> {
    Ok(Deadline {
        id: parsed(row, 0, DeadlineId::parse)?,
        case_id: parsed(row, 1, CaseId::parse)?,
        title: row.get(2)?,
        description: row.get(3)?,
        due_date: parsed(row, 4, timestamp)?,
        is_completed: row.get(5)?,
        completed_date: parsed_opt(row, 6, timestamp)?,
        is_critical: row.get(7)?,
        created_at: parsed(row, 8, timestamp)?,
        updated_at: parsed(row, 9, timestamp)?,
    })
}

pub fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: parsed(row, 0, DocumentId::parse)?,
        case_id: parsed(row, 1, CaseId::parse)?,
        title: row.get(2)?,
        document_type: row.get(3)?,
        file_path: row.get(4)?,
        uploaded_at: parsed(row, 5, timestamp)?,
        created_at: parsed(row, 6, timestamp)?,
        updated_at: parsed(row, 7, timestamp)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps_keep_subsecond_precision() {
        let at = Utc.timestamp_opt(1_717_410_600, 123_456_789).unwrap();
        assert_eq!(timestamp(&ts(at)).unwrap(), at);
    }

    #[test]
    fn dates_use_iso_format() {
        let day = NaiveDate::from_ymd_opt(2021, 3, 9).unwrap();
        assert_eq!(date_text(day), "2021-03-09");
        assert_eq!(date("2021-03-09").unwrap(), day);
    }

    #[test]
    fn decimals_round_trip_exactly() {
        let value = Decimal::from_str("1250000.75").unwrap();
        let text = decimal_opt(Some(value)).unwrap();
        assert_eq!(Decimal::from_str(&text).unwrap(), value);
    }
}
