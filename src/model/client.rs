use super::entity_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Clients.
    ClientId,
    "client"
);

/// The customer an order is billed and delivered to.
///
/// Registered accounts point at their client through
/// [`Account::client_id`](super::Account::client_id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub registration_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}
