//! # OrderItem Client
use crate::model::{OrderId, OrderItem};
use crate::order_item_actor::OrderItemError;
use tracing::{debug, instrument};

crate::resource_client!(
    /// Client for the OrderItem store.
    OrderItemClient,
    OrderItem,
    OrderItemError,
    order_item
);

impl OrderItemClient {
    #[instrument(skip(self))]
    pub async fn for_order(&self, order_id: OrderId) -> Result<Vec<OrderItem>, OrderItemError> {
        debug!("Sending request");
        self.find(move |item| item.order_id == order_id).await
    }
}
