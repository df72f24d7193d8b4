use crate::clients::{
    AccountClient, ClientClient, DeliveryClient, DriverClient, OrderClient, OrderItemClient,
    ProductClient, RestaurantClient, ReviewClient,
};
use crate::client_actor::ClientContext;
use crate::driver_actor::DriverContext;
use crate::order_actor::OrderContext;
use crate::product_actor::ProductContext;
use crate::restaurant_actor::RestaurantContext;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// One client per store. Cheap to clone.
#[derive(Clone)]
pub struct Stores {
    pub restaurants: RestaurantClient,
    pub products: ProductClient,
    pub clients: ClientClient,
    pub orders: OrderClient,
    pub order_items: OrderItemClient,
    pub drivers: DriverClient,
    pub deliveries: DeliveryClient,
    pub reviews: ReviewClient,
    pub accounts: AccountClient,
}

#[derive(Debug, Error)]
#[error("Actor task failed: {0}")]
pub struct ShutdownError(String);

/// Owns the running actors.
///
/// ```rust,ignore
/// let system = DeliverySystem::new();
/// let id = system.stores.restaurants.create_restaurant(params).await?;
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    pub stores: Stores,
    handles: Vec<JoinHandle<()>>,
}

impl DeliverySystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (delivery_actor, deliveries) = crate::delivery_actor::new();
        let handle = tokio::spawn(delivery_actor.run(()));
        Self::start(deliveries, Some(handle))
    }

    /// Like [`DeliverySystem::new`], but deliveries go to `deliveries`
    /// instead of a store of its own. Used to inject delivery failures.
    pub fn with_delivery_store(deliveries: DeliveryClient) -> Self {
        Self::start(deliveries, None)
    }

    fn start(deliveries: DeliveryClient, delivery_handle: Option<JoinHandle<()>>) -> Self {
        // 1. Create actors (no dependencies yet)
        let (restaurant_actor, restaurants) = crate::restaurant_actor::new();
        let (product_actor, products) = crate::product_actor::new();
        let (client_actor, clients) = crate::client_actor::new();
        let (order_actor, orders) = crate::order_actor::new();
        let (order_item_actor, order_items) = crate::order_item_actor::new();
        let (driver_actor, drivers) = crate::driver_actor::new();
        let (review_actor, reviews) = crate::review_actor::new();
        let (account_actor, accounts) = crate::account_actor::new();

        // 2. Start actors with injected context
        let mut handles = vec![
            tokio::spawn(restaurant_actor.run(RestaurantContext {
                products: products.clone(),
                orders: orders.clone(),
                reviews: reviews.clone(),
            })),
            tokio::spawn(client_actor.run(ClientContext {
                orders: orders.clone(),
                reviews: reviews.clone(),
            })),
            tokio::spawn(product_actor.run(ProductContext {
                order_items: order_items.clone(),
            })),
            tokio::spawn(order_actor.run(OrderContext {
                order_items: order_items.clone(),
                deliveries: deliveries.clone(),
                reviews: reviews.clone(),
            })),
            tokio::spawn(driver_actor.run(DriverContext {
                deliveries: deliveries.clone(),
            })),
            tokio::spawn(order_item_actor.run(())),
            tokio::spawn(review_actor.run(())),
            tokio::spawn(account_actor.run(())),
        ];
        handles.extend(delivery_handle);

        info!(actors = handles.len(), "Delivery system started");

        Self {
            stores: Stores {
                restaurants,
                products,
                clients,
                orders,
                order_items,
                drivers,
                deliveries,
                reviews,
                accounts,
            },
            handles,
        }
    }

    /// Drops the clients and waits for every actor to stop.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        drop(self.stores);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(ShutdownError(format!("{e:?}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for DeliverySystem {
    fn default() -> Self {
        Self::new()
    }
}
