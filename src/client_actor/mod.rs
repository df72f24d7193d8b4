//! # Client Actor
//!
//! Customers. A client is created either at registration (linked to the new
//! account) or on demand at checkout for accounts that predate the link.

pub mod entity;
pub mod error;

pub use entity::ClientContext;
pub use error::*;

use crate::clients::ClientClient;
use crate::model::Client;
use resource_actor::ResourceActor;

/// Creates a new Client actor and its client.
pub fn new() -> (ResourceActor<Client>, ClientClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ClientClient::new(generic_client))
}
