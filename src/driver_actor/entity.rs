//! [`ActorEntity`] implementation for [`Driver`].

use super::DriverError;
use crate::clients::DeliveryClient;
use crate::model::{required, Driver, DriverCreate, DriverId, DriverUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::info;

#[derive(Clone)]
pub struct DriverContext {
    pub deliveries: DeliveryClient,
}

#[async_trait]
impl ActorEntity for Driver {
    type Id = DriverId;
    type Create = DriverCreate;
    type Update = DriverUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = DriverContext;
    type Error = DriverError;

    fn from_create_params(id: DriverId, params: DriverCreate) -> Result<Self, Self::Error> {
        required(&params.name, "name is required").map_err(DriverError::ValidationError)?;

        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: params.email.trim().to_string(),
            phone_number: params.phone_number,
            vehicle_type: params.vehicle_type,
            availability: params.availability,
        })
    }

    async fn on_update(&mut self, update: DriverUpdate, _ctx: &DriverContext) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            required(&name, "name is required").map_err(DriverError::ValidationError)?;
            self.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(vehicle_type) = update.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        if let Some(availability) = update.availability {
            self.availability = availability;
        }
        Ok(())
    }

    async fn on_delete(&self, ctx: &DriverContext) -> Result<(), Self::Error> {
        let id = self.id;
        let deliveries = ctx
            .deliveries
            .delete_where(move |d| d.driver_id == id)
            .await
            .map_err(|e| DriverError::ActorCommunicationError(format!("cascade failed: {e}")))?;
        if deliveries > 0 {
            info!(driver_id = %id, deliveries, "Driver cascade");
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &DriverContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
