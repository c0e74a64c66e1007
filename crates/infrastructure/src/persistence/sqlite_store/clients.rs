//! Clients table

use application::{error::ApplicationError, ports::ClientRepository};
use async_trait::async_trait;
use domain::{Client, ClientId, EmailAddress};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::{
    SqlitePracticeStore, ensure_affected,
    rows::{CLIENT_COLUMNS, row_to_client, ts},
};

#[async_trait]
impl ClientRepository for SqlitePracticeStore {
    #[instrument(skip(self, client), fields(client_id = %client.id))]
    async fn insert(&self, client: &Client) -> Result<(), ApplicationError> {
        let c = client.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO clients (
                    id, first_name, last_name, email, phone, address, company_name,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    c.id.to_string(),
                    c.first_name,
                    c.last_name,
                    c.email.as_str(),
                    c.phone,
                    c.address,
                    c.company_name,
                    ts(c.created_at),
                    ts(c.updated_at),
                ],
            )?;
            debug!("Saved client");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, client), fields(client_id = %client.id))]
    async fn update(&self, client: &Client) -> Result<(), ApplicationError> {
        let c = client.clone();
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "UPDATE clients SET
                    first_name = ?1, last_name = ?2, email = ?3, phone = ?4,
                    address = ?5, company_name = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![
                    c.first_name,
                    c.last_name,
                    c.email.as_str(),
                    c.phone,
                    c.address,
                    c.company_name,
                    ts(c.updated_at),
                    c.id.to_string(),
                ],
            )?;
            ensure_affected(affected, "Client", c.id)
        })
        .await
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn get(&self, id: &ClientId) -> Result<Option<Client>, ApplicationError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let client = conn
                .query_row(
                    &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
                    [&id],
                    row_to_client,
                )
                .optional()?;
            Ok(client)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Client>, ApplicationError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY seq"))?;
            let clients = stmt
                .query_map([], row_to_client)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(clients)
        })
        .await
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn delete(&self, id: &ClientId) -> Result<(), ApplicationError> {
        let id = *id;
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM clients WHERE id = ?1", [id.to_string()])?;
            ensure_affected(affected, "Client", id)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Client>, ApplicationError> {
        let email = email.as_str().to_string();
        self.with_conn(move |conn| {
            let client = conn
                .query_row(
                    &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE email = ?1"),
                    [&email],
                    row_to_client,
                )
                .optional()?;
            Ok(client)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<usize, ApplicationError> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
        .await
    }
}
