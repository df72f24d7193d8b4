//! # Order Actor
//!
//! Orders are written by the checkout workflow together with their items and
//! delivery. The actor itself does not check that the client or restaurant
//! exist; the workflow resolves both before it creates anything.
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation and
//!   [`OrderContext`]
//! - [`error`] - [`OrderError`]

pub mod entity;
pub mod error;

pub use entity::OrderContext;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}
