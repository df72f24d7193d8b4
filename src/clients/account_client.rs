//! # Account Client
//!
//! Wraps a `ResourceClient<Account>` and exposes the identity lookups and the
//! account actions.
use crate::account_actor::{AccountAction, AccountActionResult, AccountError};
use crate::model::{Account, AccountId, ClientId};
use tracing::{debug, instrument};

crate::resource_client!(
    /// Client for the Account store.
    AccountClient,
    Account,
    AccountError,
    account
);

impl AccountClient {
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        debug!("Sending request");
        let username = username.trim().to_string();
        Ok(self
            .find(move |a| a.username == username)
            .await?
            .into_iter()
            .next())
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        debug!("Sending request");
        let email = email.trim().to_lowercase();
        Ok(self
            .find(move |a| a.email.to_lowercase() == email)
            .await?
            .into_iter()
            .next())
    }

    /// Marks the account active. Returns `false` if it already was.
    #[instrument(skip(self))]
    pub async fn activate(&self, id: AccountId) -> Result<bool, AccountError> {
        debug!("Activating account {}", id);
        match self.inner.perform_action(id, AccountAction::Activate).await? {
            AccountActionResult::Activate(changed) => Ok(changed),
            AccountActionResult::LinkClient(()) => Err(AccountError::ActorCommunicationError(
                "Activate answered with a LinkClient result".to_string(),
            )),
        }
    }

    /// Points the account at its customer record.
    #[instrument(skip(self))]
    pub async fn link_client(&self, id: AccountId, client_id: ClientId) -> Result<(), AccountError> {
        debug!("Linking account {} to {}", id, client_id);
        match self
            .inner
            .perform_action(id, AccountAction::LinkClient(client_id))
            .await?
        {
            AccountActionResult::LinkClient(()) => Ok(()),
            AccountActionResult::Activate(_) => Err(AccountError::ActorCommunicationError(
                "LinkClient answered with an Activate result".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_activate_reports_change() {
        let (client, mut receiver) = create_mock_client::<Account>(10);
        let accounts = AccountClient::new(client);

        let task = tokio::spawn(async move { accounts.activate(AccountId(4)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, AccountId(4));
        assert!(matches!(action, AccountAction::Activate));
        responder.send(Ok(AccountActionResult::Activate(true))).unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_link_client_surfaces_store_errors() {
        let (client, mut receiver) = create_mock_client::<Account>(10);
        let accounts = AccountClient::new(client);

        let task =
            tokio::spawn(async move { accounts.link_client(AccountId(9), ClientId(2)).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, AccountAction::LinkClient(ClientId(2))));
        responder
            .send(Err(resource_actor::FrameworkError::NotFound("account_9".to_string())))
            .unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(AccountError::NotFound(id)) if id == "account_9"
        ));
    }
}
