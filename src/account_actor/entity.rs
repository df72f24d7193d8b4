//! [`ActorEntity`] implementation for [`Account`].
//!
//! Username and email are unique. Both are compared case-insensitively and
//! checked by the store itself, so two concurrent registrations cannot both
//! claim the same name.

use super::actions::{AccountAction, AccountActionResult};
use super::AccountError;
use crate::model::{required, Account, AccountCreate, AccountId, AccountUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use tracing::info;

#[async_trait]
impl ActorEntity for Account {
    type Id = AccountId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = AccountActionResult;
    type Context = ();
    type Error = AccountError;

    /// Accounts always start inactive and unlinked.
    fn from_create_params(id: AccountId, params: AccountCreate) -> Result<Self, Self::Error> {
        required(&params.username, "username is required").map_err(AccountError::ValidationError)?;
        required(&params.email, "email is required").map_err(AccountError::ValidationError)?;

        Ok(Self {
            id,
            username: params.username.trim().to_string(),
            email: params.email.trim().to_string(),
            first_name: params.first_name.trim().to_string(),
            last_name: params.last_name.trim().to_string(),
            password_hash: params.password_hash,
            is_active: false,
            date_joined: Utc::now(),
            client_id: None,
            profile: params.profile,
        })
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.username.eq_ignore_ascii_case(&existing.username)
            || self.email.eq_ignore_ascii_case(&existing.email)
    }

    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(email) = update.email {
            required(&email, "email is required").map_err(AccountError::ValidationError)?;
            self.email = email.trim().to_string();
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(profile) = update.profile {
            if let Some(phone) = profile.phone {
                self.profile.phone = phone;
            }
            if let Some(default_address) = profile.default_address {
                self.profile.default_address = default_address;
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: AccountAction,
        _ctx: &(),
    ) -> Result<AccountActionResult, Self::Error> {
        match action {
            AccountAction::Activate => {
                let changed = !self.is_active;
                self.is_active = true;
                if changed {
                    info!(account_id = %self.id, "Account activated");
                }
                Ok(AccountActionResult::Activate(changed))
            }
            AccountAction::LinkClient(client_id) => {
                self.client_id = Some(client_id);
                Ok(AccountActionResult::LinkClient(()))
            }
        }
    }
}
