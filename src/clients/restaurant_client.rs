//! # Restaurant Client
use crate::model::Restaurant;
use crate::restaurant_actor::RestaurantError;

crate::resource_client!(
    /// Client for the Restaurant store.
    RestaurantClient,
    Restaurant,
    RestaurantError,
    restaurant
);
