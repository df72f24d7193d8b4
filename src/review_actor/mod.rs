//! # Review Actor

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ReviewClient;
use crate::model::Review;
use resource_actor::ResourceActor;

/// Creates a new Review actor and its client.
pub fn new() -> (ResourceActor<Review>, ReviewClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ReviewClient::new(generic_client))
}
