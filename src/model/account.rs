use super::{entity_id, ClientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Accounts.
    AccountId,
    "account"
);

/// Contact details created together with the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub phone: String,
    pub default_address: String,
}

/// A registered user able to log in.
///
/// Username and email are unique across accounts; the store rejects a second
/// account sharing either.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub client_id: Option<ClientId>,
    pub profile: Profile,
}

impl Account {
    /// Full name, or the username when no name was given.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub default_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile: Option<ProfileUpdate>,
}
