//! [`ActorEntity`] implementation for [`Client`].

use super::ClientError;
use crate::clients::{OrderClient, ReviewClient};
use crate::model::{required, Client, ClientCreate, ClientId, ClientUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use tracing::info;

#[derive(Clone)]
pub struct ClientContext {
    pub orders: OrderClient,
    pub reviews: ReviewClient,
}

#[async_trait]
impl ActorEntity for Client {
    type Id = ClientId;
    type Create = ClientCreate;
    type Update = ClientUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ClientContext;
    type Error = ClientError;

    fn from_create_params(id: ClientId, params: ClientCreate) -> Result<Self, Self::Error> {
        required(&params.name, "name is required").map_err(ClientError::ValidationError)?;

        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: params.email.trim().to_string(),
            address: params.address,
            phone_number: params.phone_number,
            registration_date: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: ClientUpdate, _ctx: &ClientContext) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            required(&name, "name is required").map_err(ClientError::ValidationError)?;
            self.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        Ok(())
    }

    async fn on_delete(&self, ctx: &ClientContext) -> Result<(), Self::Error> {
        let id = self.id;
        let cascade = |e: String| ClientError::ActorCommunicationError(format!("cascade failed: {e}"));
        let orders = ctx
            .orders
            .delete_where(move |o| o.client_id == id)
            .await
            .map_err(|e| cascade(e.to_string()))?;
        let reviews = ctx
            .reviews
            .delete_where(move |r| r.client_id == id)
            .await
            .map_err(|e| cascade(e.to_string()))?;

        info!(client_id = %id, orders, reviews, "Client cascade");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ClientContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
