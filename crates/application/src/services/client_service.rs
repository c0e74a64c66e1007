//! Client Service

use std::sync::Arc;

use domain::{Client, ClientId, EmailAddress};
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApplicationError,
    ports::{CaseFilter, CaseRepository, ClientRepository, ClockPort},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewClient {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClientChanges {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
}

pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    cases: Arc<dyn CaseRepository>,
    clock: Arc<dyn ClockPort>,
}

impl std::fmt::Debug for ClientService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientService").finish_non_exhaustive()
    }
}

impl ClientService {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        cases: Arc<dyn CaseRepository>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            clients,
            cases,
            clock,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewClient) -> Result<Client, ApplicationError> {
        let email = EmailAddress::new(input.email)?;
        self.ensure_email_free(&email, None).await?;

        let mut client = Client::new(input.first_name, input.last_name, email, self.clock.now());
        client.phone = input.phone;
        client.address = input.address;
        client.company_name = input.company_name;

        self.clients.insert(&client).await?;
        info!(client_id = %client.id, "Created client");
        Ok(client)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &ClientId) -> Result<Client, ApplicationError> {
        self.clients
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Client", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Client>, ApplicationError> {
        self.clients.list().await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &ClientId,
        changes: ClientChanges,
    ) -> Result<Client, ApplicationError> {
        let mut client = self.get(id).await?;

        if let Some(email) = changes.email {
            let email = EmailAddress::new(email)?;
            self.ensure_email_free(&email, Some(client.id)).await?;
            client.email = email;
        }
        if let Some(first_name) = changes.first_name {
            client.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            client.last_name = last_name;
        }
        if changes.phone.is_some() {
            client.phone = changes.phone;
        }
        if changes.address.is_some() {
            client.address = changes.address;
        }
        if changes.company_name.is_some() {
            client.company_name = changes.company_name;
        }
        client.updated_at = self.clock.now();

        self.clients.update(&client).await?;
        Ok(client)
    }

    /// Remove a client no case refers to
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ClientId) -> Result<(), ApplicationError> {
        let client = self.get(id).await?;
        let cases = self.cases.list_where(CaseFilter::Client(client.id)).await?;
        if !cases.is_empty() {
            return Err(ApplicationError::Conflict(format!(
                "client {id} is referenced by {} case(s)",
                cases.len()
            )));
        }
        self.clients.delete(id).await?;
        info!(client_id = %id, "Deleted client");
        Ok(())
    }

    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        except: Option<ClientId>,
    ) -> Result<(), ApplicationError> {
        match self.clients.find_by_email(email).await? {
            Some(found) if Some(found.id) != except => Err(ApplicationError::Conflict(format!(
                "client email {email} is already registered"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use domain::{AttorneyId, Case, CaseNumber};

    use super::*;
    use crate::ports::{MockCaseRepository, MockClientRepository, MockClockPort};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 10, 16, 0, 0).unwrap()
    }

    fn service(clients: MockClientRepository, cases: MockCaseRepository) -> ClientService {
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now());
        ClientService::new(Arc::new(clients), Arc::new(cases), Arc::new(clock))
    }

    fn stored() -> Client {
        Client::new("Li", "Wei", EmailAddress::new("li@wei.cn").unwrap(), now())
    }

    #[tokio::test]
    async fn create_rejects_taken_email() {
        let mut clients = MockClientRepository::new();
        clients
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored())));
        clients.expect_insert().never();

        let result = service(clients, MockCaseRepository::new())
            .create(NewClient {
                first_name: "Li".into(),
                last_name: "Wei".into(),
                email: "LI@wei.cn".into(),
                phone: None,
                address: None,
                company_name: None,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_stamps_updated_at() {
        let mut client = stored();
        client.updated_at = now() - chrono::Duration::days(3);
        let id = client.id;
        let mut clients = MockClientRepository::new();
        clients
            .expect_get()
            .returning(move |_| Ok(Some(client.clone())));
        clients.expect_update().times(1).returning(|_| Ok(()));

        let updated = service(clients, MockCaseRepository::new())
            .update(
                &id,
                ClientChanges {
                    company_name: Some("Wei Trading".into()),
                    ..ClientChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.updated_at, now());
        assert_eq!(updated.display_name(), "Wei Trading");
    }

    #[tokio::test]
    async fn delete_referenced_client_conflicts() {
        let client = stored();
        let id = client.id;
        let mut clients = MockClientRepository::new();
        clients
            .expect_get()
            .returning(move |_| Ok(Some(client.clone())));
        clients.expect_delete().never();
        let mut cases = MockCaseRepository::new();
        cases
            .expect_list_where()
            .withf(move |filter| *filter == CaseFilter::Client(id))
            .returning(move |_| {
                Ok(vec![Case::new(
                    CaseNumber::new("CV-5").unwrap(),
                    "Wei v. State",
                    id,
                    AttorneyId::new(),
                    now(),
                )])
            });

        let result = service(clients, cases).delete(&id).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }
}
