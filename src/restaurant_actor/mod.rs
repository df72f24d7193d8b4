//! # Restaurant Actor
//!
//! Catalog root. Restaurants are read-mostly; the only behavior beyond CRUD
//! is the cascade run when one is deleted.
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation and
//!   [`RestaurantContext`]
//! - [`error`] - [`RestaurantError`]

pub mod entity;
pub mod error;

pub use entity::RestaurantContext;
pub use error::*;

use crate::clients::RestaurantClient;
use crate::model::Restaurant;
use resource_actor::ResourceActor;

/// Creates a new Restaurant actor and its client.
pub fn new() -> (ResourceActor<Restaurant>, RestaurantClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, RestaurantClient::new(generic_client))
}
