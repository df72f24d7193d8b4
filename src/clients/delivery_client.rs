//! # Delivery Client
use crate::delivery_actor::DeliveryError;
use crate::model::{Delivery, OrderId};
use tracing::{debug, instrument};

crate::resource_client!(
    /// Client for the Delivery store.
    DeliveryClient,
    Delivery,
    DeliveryError,
    delivery
);

impl DeliveryClient {
    /// The delivery of an order, if one was dispatched.
    #[instrument(skip(self))]
    pub async fn for_order(&self, order_id: OrderId) -> Result<Option<Delivery>, DeliveryError> {
        debug!("Sending request");
        Ok(self
            .find(move |d| d.order_id == order_id)
            .await?
            .into_iter()
            .next())
    }

    /// Deliveries still pending or in transit.
    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Vec<Delivery>, DeliveryError> {
        debug!("Sending request");
        self.find(|d| d.delivery_status.is_active()).await
    }
}
