//! # Order Item Actor
//!
//! Lines of placed orders. Items are written once and never updated; they
//! disappear only through the order or product cascades.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderItemClient;
use crate::model::OrderItem;
use resource_actor::ResourceActor;

/// Creates a new OrderItem actor and its client.
pub fn new() -> (ResourceActor<OrderItem>, OrderItemClient) {
    let (actor, generic_client) = ResourceActor::new(64);
    (actor, OrderItemClient::new(generic_client))
}
