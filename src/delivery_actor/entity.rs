//! [`ActorEntity`] implementation for [`Delivery`].
//!
//! An order is dispatched at most once: a second delivery for the same order
//! is rejected by the store as a conflict.

use super::DeliveryError;
use crate::model::{Delivery, DeliveryCreate, DeliveryId, DeliveryUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Delivery {
    type Id = DeliveryId;
    type Create = DeliveryCreate;
    type Update = DeliveryUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = DeliveryError;

    fn from_create_params(id: DeliveryId, params: DeliveryCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            order_id: params.order_id,
            driver_id: params.driver_id,
            delivery_date: params.delivery_date,
            delivery_time: params.delivery_time,
            delivery_status: params.delivery_status,
        })
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.order_id == existing.order_id
    }

    async fn on_update(&mut self, update: DeliveryUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(driver_id) = update.driver_id {
            self.driver_id = driver_id;
        }
        if let Some(delivery_date) = update.delivery_date {
            self.delivery_date = delivery_date;
        }
        if let Some(delivery_time) = update.delivery_time {
            self.delivery_time = delivery_time;
        }
        if let Some(delivery_status) = update.delivery_status {
            self.delivery_status = delivery_status;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
