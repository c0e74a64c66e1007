//! Client persistence port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use domain::{Client, ClientId, EmailAddress};

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn insert(&self, client: &Client) -> Result<(), ApplicationError>;

    async fn update(&self, client: &Client) -> Result<(), ApplicationError>;

    async fn get(&self, id: &ClientId) -> Result<Option<Client>, ApplicationError>;

    async fn list(&self) -> Result<Vec<Client>, ApplicationError>;

    async fn delete(&self, id: &ClientId) -> Result<(), ApplicationError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Client>, ApplicationError>;

    /// Number of stored clients
    async fn count(&self) -> Result<usize, ApplicationError>;
}
