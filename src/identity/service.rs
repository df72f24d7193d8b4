use super::form::{check, LoginForm, ProfileForm, RegistrationForm, ValidationErrors};
use super::password::{hash_password, verify_password};
use super::{IdentityError, TokenSigner};
use crate::account_actor::AccountError;
use crate::clients::{AccountClient, ActorClient, ClientClient};
use crate::config::Config;
use crate::model::{Account, AccountCreate, AccountId, Client, ClientCreate, Profile};
use crate::notification::{activation_email, Mailer};
use chrono::Duration;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationOutcome {
    Activated,
    AlreadyActive,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub account: Account,
    pub activation_sent: bool,
}

fn store(e: impl Display) -> IdentityError {
    IdentityError::Store(e.to_string())
}

#[derive(Clone)]
pub struct IdentityService {
    accounts: AccountClient,
    clients: ClientClient,
    mailer: Arc<dyn Mailer>,
    signer: TokenSigner,
    config: Arc<Config>,
}

impl IdentityService {
    pub fn new(
        accounts: AccountClient,
        clients: ClientClient,
        mailer: Arc<dyn Mailer>,
        config: Arc<Config>,
    ) -> Self {
        let signer = TokenSigner::new(
            &config.secret_key,
            Duration::hours(config.activation_ttl_hours),
        );
        Self {
            accounts,
            clients,
            mailer,
            signer,
            config,
        }
    }

    /// Creates an inactive account with its profile, links it to a client
    /// and mails the activation link.
    #[instrument(skip_all, fields(username = %form.username))]
    pub async fn register(&self, form: RegistrationForm) -> Result<Registration, IdentityError> {
        let mut errors = check(&form);
        let username = form.username.trim().to_string();
        let email = form.email.trim().to_string();

        if !username.is_empty() && self.accounts.find_by_username(&username).await.map_err(store)?.is_some() {
            errors.add("username", "username already taken");
        }
        if !email.is_empty() && self.accounts.find_by_email(&email).await.map_err(store)?.is_some() {
            errors.add("email", "email already registered");
        }
        if !errors.is_empty() {
            return Err(IdentityError::Validation(errors));
        }

        let password_hash = hash_password(form.password, self.config.bcrypt_cost).await?;
        let id = self
            .accounts
            .create_account(AccountCreate {
                username,
                email,
                first_name: form.first_name,
                last_name: form.last_name,
                password_hash,
                profile: Profile {
                    phone: form.phone.trim().to_string(),
                    default_address: form.default_address.trim().to_string(),
                },
            })
            .await
            .map_err(|e| match e {
                AccountError::Conflict(_) => IdentityError::Validation(ValidationErrors::single(
                    "username",
                    "username or email already registered",
                )),
                AccountError::ValidationError(msg) => {
                    IdentityError::Validation(ValidationErrors::single("username", &msg))
                }
                other => store(other),
            })?;

        let account = self.account(id).await?;
        let client = self.client_for(&account).await?;
        self.accounts.link_client(id, client.id).await.map_err(store)?;

        let activation_sent = self.send_activation(&account).await;
        if !activation_sent && self.config.debug {
            warn!(account_id = %id, "Activation email failed, activating directly (DEBUG)");
            self.accounts.activate(id).await.map_err(store)?;
        }

        info!(account_id = %id, client_id = %client.id, activation_sent, "Account registered");
        Ok(Registration {
            account: self.account(id).await?,
            activation_sent,
        })
    }

    /// Reuses the client registered under the same email, else creates one.
    async fn client_for(&self, account: &Account) -> Result<Client, IdentityError> {
        if let Some(client) = self.clients.find_by_email(&account.email).await.map_err(store)? {
            info!(client_id = %client.id, "Reusing client with the same email");
            return Ok(client);
        }
        let id = self
            .clients
            .create_client(ClientCreate {
                name: account.display_name(),
                email: account.email.clone(),
                address: account.profile.default_address.clone(),
                phone_number: account.profile.phone.clone(),
            })
            .await
            .map_err(store)?;
        self.clients
            .get(id)
            .await
            .map_err(store)?
            .ok_or_else(|| IdentityError::Store(format!("{id} vanished")))
    }

    async fn send_activation(&self, account: &Account) -> bool {
        let token = match self.signer.issue(account) {
            Ok(token) => token,
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "Could not sign activation token");
                return false;
            }
        };
        let link = format!(
            "{}/activate/{}/{}/",
            self.config.public_url, account.id.0, token
        );
        let email = activation_email(&account.email, &account.display_name(), &link);

        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "Activation email not sent");
                false
            }
        }
    }

    /// Activates the account if `token` was issued for it. Visiting the link
    /// of an already active account changes nothing.
    #[instrument(skip(self, token))]
    pub async fn activate(&self, id: AccountId, token: &str) -> Result<ActivationOutcome, IdentityError> {
        let account = self.account(id).await?;
        if account.is_active {
            return Ok(ActivationOutcome::AlreadyActive);
        }

        self.signer.verify(token, &account)?;

        Ok(if self.accounts.activate(id).await.map_err(store)? {
            ActivationOutcome::Activated
        } else {
            ActivationOutcome::AlreadyActive
        })
    }

    #[instrument(skip_all, fields(username = %form.username))]
    pub async fn login(&self, form: LoginForm) -> Result<Account, IdentityError> {
        let Some(account) = self
            .accounts
            .find_by_username(&form.username)
            .await
            .map_err(store)?
        else {
            return Err(IdentityError::InvalidCredentials);
        };

        if !verify_password(form.password, account.password_hash.clone()).await? {
            return Err(IdentityError::InvalidCredentials);
        }
        if !account.is_active {
            return Err(IdentityError::AccountInactive);
        }

        info!(account_id = %account.id, "Logged in");
        Ok(account)
    }

    pub async fn account(&self, id: AccountId) -> Result<Account, IdentityError> {
        self.accounts
            .get(id)
            .await
            .map_err(store)?
            .ok_or(IdentityError::AccountNotFound(id))
    }

    #[instrument(skip(self, form))]
    pub async fn update_profile(&self, id: AccountId, form: ProfileForm) -> Result<Account, IdentityError> {
        let errors = check(&form);
        if !errors.is_empty() {
            return Err(IdentityError::Validation(errors));
        }

        self.accounts
            .update_account(id, form.into_update())
            .await
            .map_err(|e| match e {
                AccountError::NotFound(_) => IdentityError::AccountNotFound(id),
                AccountError::Conflict(_) => IdentityError::Validation(ValidationErrors::single(
                    "email",
                    "email already registered",
                )),
                AccountError::ValidationError(msg) => {
                    IdentityError::Validation(ValidationErrors::single("email", &msg))
                }
                other => store(other),
            })
    }
}
