//! # Delivery Actor

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DeliveryClient;
use crate::model::Delivery;
use resource_actor::ResourceActor;

/// Creates a new Delivery actor and its client.
pub fn new() -> (ResourceActor<Delivery>, DeliveryClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, DeliveryClient::new(generic_client))
}
