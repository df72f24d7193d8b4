//! # Account Actor
//!
//! Registered users. Besides CRUD the actor answers two custom actions:
//!
//! ```rust,ignore
//! // Flip an inactive account to active (no-op if already active)
//! let changed = accounts.activate(account_id).await?;
//!
//! // Point the account at its customer record
//! accounts.link_client(account_id, client_id).await?;
//! ```
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation
//! - [`error`] - [`AccountError`]
//! - [`actions`] - [`AccountAction`] and [`AccountActionResult`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::AccountClient;
use crate::model::Account;
use resource_actor::ResourceActor;

/// Creates a new Account actor and its client.
pub fn new() -> (ResourceActor<Account>, AccountClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, AccountClient::new(generic_client))
}
