//! # Driver Actor

pub mod entity;
pub mod error;

pub use entity::DriverContext;
pub use error::*;

use crate::clients::DriverClient;
use crate::model::Driver;
use resource_actor::ResourceActor;

/// Creates a new Driver actor and its client.
pub fn new() -> (ResourceActor<Driver>, DriverClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, DriverClient::new(generic_client))
}
