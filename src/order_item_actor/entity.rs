//! [`ActorEntity`] implementation for [`OrderItem`].

use super::OrderItemError;
use crate::model::{money, OrderItem, OrderItemCreate, OrderItemId, OrderItemUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for OrderItem {
    type Id = OrderItemId;
    type Create = OrderItemCreate;
    type Update = OrderItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderItemError;

    fn from_create_params(id: OrderItemId, params: OrderItemCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(OrderItemError::ValidationError(
                "quantity must be positive".to_string(),
            ));
        }
        if params.unit_price.is_sign_negative() {
            return Err(OrderItemError::ValidationError(format!(
                "unit price {} must not be negative",
                params.unit_price
            )));
        }

        Ok(Self {
            id,
            order_id: params.order_id,
            product_id: params.product_id,
            quantity: params.quantity,
            unit_price: money(params.unit_price),
        })
    }

    async fn on_update(&mut self, update: OrderItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
