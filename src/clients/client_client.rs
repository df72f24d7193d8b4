//! Typed client for the customer store.
use crate::client_actor::ClientError;
use crate::model::Client;
use tracing::{debug, instrument};

crate::resource_client!(
    /// Client for the Client (customer) store.
    ClientClient,
    Client,
    ClientError,
    client
);

impl ClientClient {
    /// First customer, by id, whose email matches ignoring case.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Client>, ClientError> {
        debug!("Sending request");
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Ok(None);
        }
        Ok(self
            .find(move |c| c.email.to_lowercase() == email)
            .await?
            .into_iter()
            .next())
    }

    /// First customer, by id, with exactly this name.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Client>, ClientError> {
        debug!("Sending request");
        let name = name.to_string();
        Ok(self.find(move |c| c.name == name).await?.into_iter().next())
    }
}
