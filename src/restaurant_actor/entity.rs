//! [`ActorEntity`] implementation for [`Restaurant`].
//!
//! Deleting a restaurant removes everything that hangs off it: its orders
//! (which take their items, delivery and reviews with them), any remaining
//! reviews, and finally its products.

use super::RestaurantError;
use crate::clients::{OrderClient, ProductClient, ReviewClient};
use crate::model::{
    required, validate_rating, Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate,
};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::info;

/// Stores the restaurant actor cascades into.
#[derive(Clone)]
pub struct RestaurantContext {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub reviews: ReviewClient,
}

fn cascade_failed(e: impl std::fmt::Display) -> RestaurantError {
    RestaurantError::ActorCommunicationError(format!("cascade failed: {e}"))
}

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = RestaurantContext;
    type Error = RestaurantError;

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, Self::Error> {
        required(&params.name, "name is required").map_err(RestaurantError::ValidationError)?;
        let rating = validate_rating(params.rating).map_err(RestaurantError::ValidationError)?;

        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            address: params.address,
            phone_number: params.phone_number,
            opening_time: params.opening_time,
            closing_time: params.closing_time,
            rating,
        })
    }

    async fn on_update(
        &mut self,
        update: RestaurantUpdate,
        _ctx: &RestaurantContext,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            required(&name, "name is required").map_err(RestaurantError::ValidationError)?;
            self.name = name.trim().to_string();
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(opening_time) = update.opening_time {
            self.opening_time = opening_time;
        }
        if let Some(closing_time) = update.closing_time {
            self.closing_time = closing_time;
        }
        if let Some(rating) = update.rating {
            self.rating = validate_rating(rating).map_err(RestaurantError::ValidationError)?;
        }
        Ok(())
    }

    async fn on_delete(&self, ctx: &RestaurantContext) -> Result<(), Self::Error> {
        let id = self.id;
        let orders = ctx
            .orders
            .delete_where(move |o| o.restaurant_id == id)
            .await
            .map_err(cascade_failed)?;
        let reviews = ctx
            .reviews
            .delete_where(move |r| r.restaurant_id == id)
            .await
            .map_err(cascade_failed)?;
        let products = ctx
            .products
            .delete_where(move |p| p.restaurant_id == id)
            .await
            .map_err(cascade_failed)?;

        info!(restaurant_id = %id, orders, reviews, products, "Restaurant cascade");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &RestaurantContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
