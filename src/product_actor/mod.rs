//! # Product Actor
//!
//! Products belong to one restaurant. Deleting a product removes the order
//! items that reference it.

pub mod entity;
pub mod error;

pub use entity::ProductContext;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new() -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ProductClient::new(generic_client))
}
