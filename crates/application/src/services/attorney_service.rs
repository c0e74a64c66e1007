//! Attorney Service - registration and maintenance of the firm's attorneys

use std::sync::Arc;

use chrono::NaiveDate;
use domain::{Attorney, AttorneyId, BarNumber, EmailAddress};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApplicationError,
    ports::{AttorneyRepository, CaseFilter, CaseRepository, ClockPort},
};

/// Input for registering an attorney
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAttorney {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 3, max = 20))]
    pub bar_number: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub specialization: Option<String>,
    /// Defaults to today
    pub hire_date: Option<NaiveDate>,
    pub hourly_rate: Option<Decimal>,
}

/// Fields to change on an attorney; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AttorneyChanges {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub bar_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub hourly_rate: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Service for attorney records
pub struct AttorneyService {
    attorneys: Arc<dyn AttorneyRepository>,
    cases: Arc<dyn CaseRepository>,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for AttorneyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttorneyService").finish_non_exhaustive()
    }
}

impl AttorneyService {
    pub fn new(
        attorneys: Arc<dyn AttorneyRepository>,
        cases: Arc<dyn CaseRepository>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            attorneys,
            cases,
            clock,
        }
    }

    /// Register an attorney; bar number and email must be unused
    #[instrument(skip(self, input), fields(bar_number = %input.bar_number))]
    pub async fn create(&self, input: NewAttorney) -> Result<Attorney, ApplicationError> {
        let bar_number = BarNumber::new(input.bar_number)?;
        let email = EmailAddress::new(input.email)?;
        self.ensure_unique(&bar_number, &email, None).await?;

        let now = self.clock.now();
        let mut attorney = Attorney::new(
            input.first_name,
            input.last_name,
            bar_number,
            email,
            now,
        );
        attorney.phone = input.phone;
        attorney.specialization = input.specialization;
        attorney.hourly_rate = input.hourly_rate;
        if let Some(hire_date) = input.hire_date {
            attorney.hire_date = hire_date;
        }

        self.attorneys.insert(&attorney).await?;
        info!(attorney_id = %attorney.id, "Registered attorney");
        Ok(attorney)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &AttorneyId) -> Result<Attorney, ApplicationError> {
        self.attorneys
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Attorney", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Attorney>, ApplicationError> {
        self.attorneys.list().await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &AttorneyId,
        changes: AttorneyChanges,
    ) -> Result<Attorney, ApplicationError> {
        let mut attorney = self.get(id).await?;

        let bar_number = changes.bar_number.map(BarNumber::new).transpose()?;
        let email = changes.email.map(EmailAddress::new).transpose()?;
        if bar_number.is_some() || email.is_some() {
            self.ensure_unique(
                bar_number.as_ref().unwrap_or(&attorney.bar_number),
                email.as_ref().unwrap_or(&attorney.email),
                Some(attorney.id),
            )
            .await?;
        }

        if let Some(first_name) = changes.first_name {
            attorney.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            attorney.last_name = last_name;
        }
        if let Some(bar_number) = bar_number {
            attorney.bar_number = bar_number;
        }
        if let Some(email) = email {
            attorney.email = email;
        }
        if changes.phone.is_some() {
            attorney.phone = changes.phone;
        }
        if changes.specialization.is_some() {
            attorney.specialization = changes.specialization;
        }
        if let Some(hire_date) = changes.hire_date {
            attorney.hire_date = hire_date;
        }
        if changes.hourly_rate.is_some() {
            attorney.hourly_rate = changes.hourly_rate;
        }
        if let Some(is_active) = changes.is_active {
            attorney.is_active = is_active;
        }
        attorney.updated_at = self.clock.now();

        self.attorneys.update(&attorney).await?;
        info!(attorney_id = %attorney.id, "Updated attorney");
        Ok(attorney)
    }

    /// Remove an attorney that has no cases assigned
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &AttorneyId) -> Result<(), ApplicationError> {
        let attorney = self.get(id).await?;
        let assigned = self.cases.list_where(CaseFilter::Attorney(attorney.id)).await?;
        if !assigned.is_empty() {
            return Err(ApplicationError::Conflict(format!(
                "attorney {id} is assigned to {} case(s)",
                assigned.len()
            )));
        }
        self.attorneys.delete(id).await?;
        info!(attorney_id = %id, "Deleted attorney");
        Ok(())
    }

    async fn ensure_unique(
        &self,
        bar_number: &BarNumber,
        email: &EmailAddress,
        except: Option<AttorneyId>,
    ) -> Result<(), ApplicationError> {
        let is_other = |found: &Attorney| Some(found.id) != except;

        if self
            .attorneys
            .find_by_bar_number(bar_number)
            .await?
            .is_some_and(|found| is_other(&found))
        {
            return Err(ApplicationError::Conflict(format!(
                "bar number {bar_number} is already registered"
            )));
        }
        if self
            .attorneys
            .find_by_email(email)
            .await?
            .is_some_and(|found| is_other(&found))
        {
            return Err(ApplicationError::Conflict(format!(
                "attorney email {email} is already registered"
            )));
        }
        Ok(())
    }
}
