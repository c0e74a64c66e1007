//! Attorneys table

use application::{error::ApplicationError, ports::AttorneyRepository};
use async_trait::async_trait;
use domain::{Attorney, AttorneyId, BarNumber, EmailAddress};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{ATTORNEY_COLUMNS, date_text, decimal_opt, row_to_attorney, ts},
};

#[async_trait]
impl AttorneyRepository for SqlitePracticeStore {
    #[instrument(skip(self, attorney), fields(attorney_id = %attorney.id))]
    async fn insert(&self, attorney: &Attorney) -> Result<(), ApplicationError> {
        let a = attorney.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO attorneys (
                    id, first_name, last_name, bar_number, email, phone,
                    specialization, hire_date, hourly_rate, is_active, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    a.id.to_string(),
                    a.first_name,
                    a.last_name,
                    a.bar_number.as_str(),
                    a.email.as_str(),
                    a.phone,
                    a.specialization,
                    date_text(a.hire_date),
                    decimal_opt(a.hourly_rate),
                    a.is_active,
                    ts(a.created_at),
                    ts(a.updated_at),
                ],
            )?;
            debug!("Saved attorney");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, attorney), fields(attorney_id = %attorney.id))]
    async fn update(&self, attorney: &Attorney) -> Result<(), ApplicationError> {
        let a = attorney.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE attorneys SET
                    first_name = ?1, last_name = ?2, bar_number = ?3, email = ?4,
                    phone = ?5, specialization = ?6, hire_date = ?7, hourly_rate = ?8,
                    is_active = ?9, updated_at = ?10
                 WHERE id = ?11",
                params![
                    a.first_name,
                    a.last_name,
                    a.bar_number.as_str(),
                    a.email.as_str(),
                    a.phone,
                    a.specialization,
                    date_text(a.hire_date),
                    decimal_opt(a.hourly_rate),
                    a.is_active,
                    ts(a.updated_at),
                    a.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Attorney", a.id)
        })
        .await
    }

    #[instrument(skip(self), fields(attorney_id = %id))]
    async fn get(&self, id: &AttorneyId) -> Result<Option<Attorney>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let attorney = conn
                .query_row(
                    &format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys WHERE id = ?1"),
                    [&id],
                    row_to_attorney,
                )
                .optional()?;
            Ok(attorney)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Attorney>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys ORDER BY seq"))?;
            let attorneys = stmt
                .query_map([], row_to_attorney)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(attorneys)
        })
        .await
    }

    #[instrument(skip(self), fields(attorney_id = %id))]
    async fn delete(&self, id: &AttorneyId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM attorneys WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Attorney", id)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_bar_number(
        &self,
        bar_number: &BarNumber,
    ) -> Result<Option<Attorney>, ApplicationError> {
        let bar_number = bar_number.as_str().to_string();
        self.with_conn(move |conn| {
            let attorney = conn
                .query_row(
                    &format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys WHERE bar_number = ?1"),
                    [&bar_number],
                    row_to_attorney,
                )
                .optional()?;
            Ok(attorney)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Attorney>, ApplicationError> {
        let email = email.as_str().to_string();
        self.with_conn(move |conn| {
            let attorney = conn
                .query_row(
                    &format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys WHERE email = ?1"),
                    [&email],
                    row_to_attorney,
                )
                .optional()?;
            Ok(attorney)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::super::test_support::{attorney, store};
    use super::*;

    #[tokio::test]
    async fn insert_and_get_round_trips() {
        let store = store();
        let attorney = attorney("NY-100")
            .with_specialization("Tax")
            .with_hourly_rate(Decimal::new(42550, 2));

        AttorneyRepository::insert(&store, &attorney).await.unwrap();
        let loaded = AttorneyRepository::get(&store, &attorney.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, attorney);
    }

    #[tokio::test]
    async fn duplicate_bar_number_is_conflict() {
        let store = store();
        AttorneyRepository::insert(&store, &attorney("NY-100"))
            .await
            .unwrap();
        let mut twin = attorney("NY-100");
        twin.email = EmailAddress::new("twin@firm.law").unwrap();
        let result = AttorneyRepository::insert(&store, &twin).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[tokio::test]
    async fn lookups_by_unique_keys() {
        let store = store();
        let attorney = attorney("NY-200");
        AttorneyRepository::insert(&store, &attorney).await.unwrap();

        let by_bar = store
            .find_by_bar_number(&BarNumber::new("ny-200").unwrap())
            .await
            .unwrap();
        assert_eq!(by_bar.map(|a| a.id), Some(attorney.id));
        let by_email = AttorneyRepository::find_by_email(&store, &attorney.email)
            .await
            .unwrap();
        assert_eq!(by_email.map(|a| a.id), Some(attorney.id));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = store();
        for bar in ["NY-3", "NY-1", "NY-2"] {
            AttorneyRepository::insert(&store, &attorney(bar)).await.unwrap();
        }
        let bars: Vec<_> = AttorneyRepository::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.bar_number.to_string())
            .collect();
        assert_eq!(bars, vec!["NY-3", "NY-1", "NY-2"]);
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() {
        let store = store();
        let ghost = attorney("NY-404");
        assert!(matches!(
            AttorneyRepository::update(&store, &ghost).await,
            Err(ApplicationError::NotFound(_))
        ));
        assert!(matches!(
            AttorneyRepository::delete(&store, &ghost.id).await,
            Err(ApplicationError::NotFound(_))
        ));
    }
}
