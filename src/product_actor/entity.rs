//! [`ActorEntity`] implementation for [`Product`].

use super::ProductError;
use crate::clients::OrderItemClient;
use crate::model::{required, validate_price, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::info;

#[derive(Clone)]
pub struct ProductContext {
    pub order_items: OrderItemClient,
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ProductContext;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        required(&params.name, "name is required").map_err(ProductError::ValidationError)?;
        let price = validate_price(params.price).map_err(ProductError::ValidationError)?;

        Ok(Self {
            id,
            restaurant_id: params.restaurant_id,
            name: params.name.trim().to_string(),
            price,
            description: params.description,
            availability: params.availability,
        })
    }

    /// Price changes never touch placed orders: order items keep their own
    /// unit price.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &ProductContext) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            required(&name, "name is required").map_err(ProductError::ValidationError)?;
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = validate_price(price).map_err(ProductError::ValidationError)?;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(availability) = update.availability {
            self.availability = availability;
        }
        Ok(())
    }

    async fn on_delete(&self, ctx: &ProductContext) -> Result<(), Self::Error> {
        let id = self.id;
        let items = ctx
            .order_items
            .delete_where(move |item| item.product_id == id)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(format!("cascade failed: {e}")))?;
        if items > 0 {
            info!(product_id = %id, items, "Product cascade");
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ProductContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
