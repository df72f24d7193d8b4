//! [`ActorEntity`] implementation for [`Order`].
//!
//! An order's total is fixed when it is written. Nothing in [`OrderUpdate`]
//! can change it, so the total always matches the items captured at checkout.

use super::OrderError;
use crate::clients::{DeliveryClient, OrderItemClient, ReviewClient};
use crate::model::{money, Order, OrderCreate, OrderId, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use tracing::info;

/// Stores the order actor cascades into.
#[derive(Clone)]
pub struct OrderContext {
    pub order_items: OrderItemClient,
    pub deliveries: DeliveryClient,
    pub reviews: ReviewClient,
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.total.is_sign_negative() {
            return Err(OrderError::ValidationError(format!(
                "total {} must not be negative",
                params.total
            )));
        }

        Ok(Self {
            id,
            client_id: params.client_id,
            restaurant_id: params.restaurant_id,
            creation_date: Utc::now(),
            status: params.status,
            total: money(params.total),
            delivery_date: params.delivery_date,
            delivery_address: params.delivery_address,
            payment_method: params.payment_method,
            comments: params.comments,
        })
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(delivery_date) = update.delivery_date {
            self.delivery_date = delivery_date;
        }
        if let Some(delivery_address) = update.delivery_address {
            self.delivery_address = delivery_address;
        }
        if let Some(payment_method) = update.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(comments) = update.comments {
            self.comments = comments;
        }
        Ok(())
    }

    /// Removes the items, the delivery and the reviews of the order. This is
    /// also the compensating step when checkout fails half way.
    async fn on_delete(&self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let id = self.id;
        let cascade = |e: String| OrderError::ActorCommunicationError(format!("cascade failed: {e}"));

        let items = ctx
            .order_items
            .delete_where(move |item| item.order_id == id)
            .await
            .map_err(|e| cascade(e.to_string()))?;
        let deliveries = ctx
            .deliveries
            .delete_where(move |d| d.order_id == id)
            .await
            .map_err(|e| cascade(e.to_string()))?;
        let reviews = ctx
            .reviews
            .delete_where(move |r| r.order_id == id)
            .await
            .map_err(|e| cascade(e.to_string()))?;

        info!(order_id = %id, items, deliveries, reviews, "Order cascade");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
