//! # Order Client
use crate::model::{ClientId, Order};
use crate::order_actor::OrderError;
use tracing::{debug, instrument};

crate::resource_client!(
    /// Client for the Order store.
    OrderClient,
    Order,
    OrderError,
    order
);

impl OrderClient {
    /// Orders of one customer, newest first.
    #[instrument(skip(self))]
    pub async fn history(&self, client_id: ClientId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.find(move |o| o.client_id == client_id).await?;
        orders.sort_by(|a, b| {
            b.creation_date
                .cmp(&a.creation_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(orders)
    }
}
