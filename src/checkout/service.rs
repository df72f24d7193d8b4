use super::{select_driver, CheckoutError};
use crate::cart::{Cart, CartLine};
use crate::clients::ActorClient;
use crate::lifecycle::Stores;
use crate::model::{
    money, Account, Client, ClientCreate, ClientUpdate, Delivery, DeliveryCreate, DeliveryStatus,
    Driver, DriverCreate, Order, OrderCreate, OrderId, OrderItem, OrderItemCreate, OrderStatus,
    PaymentMethod, Product, Restaurant,
};
use crate::notification::{ConfirmationLine, Mailer, OrderConfirmation};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const NO_ADDRESS: &str = "Not specified";

/// What the customer fills in on the checkout page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub comments: String,
}

/// An order with everything the success page shows.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order: Order,
    pub restaurant: Option<Restaurant>,
    pub items: Vec<OrderItem>,
    pub delivery: Option<Delivery>,
    pub driver: Option<Driver>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    #[serde(flatten)]
    pub summary: OrderSummary,
    /// Whether the confirmation email went out.
    pub notified: bool,
}

fn store(e: impl Display) -> CheckoutError {
    CheckoutError::Store(e.to_string())
}

#[derive(Clone)]
pub struct CheckoutService {
    stores: Stores,
    mailer: Arc<dyn Mailer>,
}

impl CheckoutService {
    pub fn new(stores: Stores, mailer: Arc<dyn Mailer>) -> Self {
        Self { stores, mailer }
    }

    /// Places the session cart and empties it. On any error the cart is left
    /// as it was.
    pub async fn checkout(
        &self,
        account: &Account,
        cart: &mut Cart,
        form: &CheckoutForm,
    ) -> Result<Receipt, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let receipt = self.place_order(account, cart.lines(), form).await?;
        cart.clear();
        Ok(receipt)
    }

    /// Runs the whole workflow for explicit lines.
    #[instrument(skip_all, fields(account_id = %account.id, lines = lines.len()))]
    pub async fn place_order(
        &self,
        account: &Account,
        lines: &[CartLine],
        form: &CheckoutForm,
    ) -> Result<Receipt, CheckoutError> {
        let priced = self.resolve_lines(lines).await?;
        let Some((first, _)) = priced.first() else {
            return Err(CheckoutError::EmptyCart);
        };

        let restaurant_id = first.restaurant_id;
        if priced.iter().any(|(p, _)| p.restaurant_id != restaurant_id) {
            warn!(%restaurant_id, "Cart spans several restaurants, ordering from the first");
        }
        self.stores
            .restaurants
            .get(restaurant_id)
            .await
            .map_err(store)?
            .ok_or_else(|| CheckoutError::Store(format!("{restaurant_id} no longer exists")))?;

        let client = self.resolve_client(account).await?;

        let total = money(priced.iter().map(|(p, qty)| p.subtotal(*qty)).sum::<Decimal>());
        let delivery_address = [
            form.delivery_address.trim(),
            client.address.trim(),
            account.profile.default_address.trim(),
        ]
        .into_iter()
        .find(|a| !a.is_empty())
        .unwrap_or(NO_ADDRESS)
        .to_string();

        let order_id = self
            .stores
            .orders
            .create_order(OrderCreate {
                client_id: client.id,
                restaurant_id,
                status: OrderStatus::Pending,
                total,
                delivery_date: Utc::now(),
                delivery_address,
                payment_method: form.payment_method,
                comments: form.comments.trim().to_string(),
            })
            .await
            .map_err(|e| CheckoutError::WorkflowFailed(e.to_string()))?;

        let summary = match self.complete(order_id, &priced).await {
            Ok(summary) => summary,
            Err(reason) => {
                error!(%order_id, %reason, "Checkout failed, removing partial order");
                self.compensate(order_id).await;
                return Err(CheckoutError::WorkflowFailed(reason));
            }
        };

        self.remember_address(&client, &form.delivery_address).await;
        let notified = self.notify(account, &summary, &priced).await;
        info!(%order_id, %total, notified, "Order placed");

        Ok(Receipt { summary, notified })
    }

    /// The order with its restaurant, items, delivery and driver.
    pub async fn summary(&self, order_id: OrderId) -> Result<Option<OrderSummary>, CheckoutError> {
        let Some(order) = self.stores.orders.get(order_id).await.map_err(store)? else {
            return Ok(None);
        };
        let restaurant = self
            .stores
            .restaurants
            .get(order.restaurant_id)
            .await
            .map_err(store)?;
        let items = self.stores.order_items.for_order(order_id).await.map_err(store)?;
        let delivery = self.stores.deliveries.for_order(order_id).await.map_err(store)?;
        let driver = match &delivery {
            Some(d) => self.stores.drivers.get(d.driver_id).await.map_err(store)?,
            None => None,
        };

        Ok(Some(OrderSummary {
            order,
            restaurant,
            items,
            delivery,
            driver,
        }))
    }

    async fn resolve_lines(&self, lines: &[CartLine]) -> Result<Vec<(Product, u32)>, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let mut priced = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity == 0 {
                return Err(CheckoutError::Validation(format!(
                    "quantity of {} must be positive",
                    line.product_id
                )));
            }
            let product = self
                .stores
                .products
                .get(line.product_id)
                .await
                .map_err(store)?
                .ok_or(CheckoutError::ProductNotFound(line.product_id))?;
            if !product.availability {
                return Err(CheckoutError::Unavailable {
                    id: product.id,
                    name: product.name,
                });
            }
            priced.push((product, line.quantity));
        }
        Ok(priced)
    }

    /// The linked client, or one found by display name (then linked), or a
    /// new one.
    async fn resolve_client(&self, account: &Account) -> Result<Client, CheckoutError> {
        let clients = &self.stores.clients;
        let linked = match account.client_id {
            Some(id) => clients.get(id).await.map_err(store)?,
            None => None,
        };

        let client = match linked {
            Some(client) => client,
            None => {
                let name = account.display_name();
                let client = match clients.find_by_name(&name).await.map_err(store)? {
                    Some(client) => client,
                    None => {
                        let id = clients
                            .create_client(ClientCreate {
                                name,
                                email: account.email.clone(),
                                address: account.profile.default_address.clone(),
                                phone_number: account.profile.phone.clone(),
                            })
                            .await
                            .map_err(store)?;
                        clients
                            .get(id)
                            .await
                            .map_err(store)?
                            .ok_or_else(|| CheckoutError::Store(format!("{id} vanished")))?
                    }
                };
                self.stores
                    .accounts
                    .link_client(account.id, client.id)
                    .await
                    .map_err(store)?;
                client
            }
        };

        Ok(client)
    }

    /// A non-empty checkout address different from the stored one replaces
    /// it once the order is placed.
    async fn remember_address(&self, client: &Client, address: &str) {
        let address = address.trim();
        if address.is_empty() || address == client.address {
            return;
        }
        let update = ClientUpdate {
            address: Some(address.to_string()),
            ..Default::default()
        };
        if let Err(e) = self.stores.clients.update_client(client.id, update).await {
            warn!(client_id = %client.id, error = %e, "Client address not updated");
        }
    }

    /// Steps that must all succeed once the order exists.
    async fn complete(&self, order_id: OrderId, priced: &[(Product, u32)]) -> Result<OrderSummary, String> {
        for (product, quantity) in priced {
            self.stores
                .order_items
                .create_order_item(OrderItemCreate {
                    order_id,
                    product_id: product.id,
                    quantity: *quantity,
                    unit_price: product.price,
                })
                .await
                .map_err(|e| e.to_string())?;
        }

        let driver = self.assign_driver().await?;

        let now = Utc::now();
        self.stores
            .deliveries
            .create_delivery(DeliveryCreate {
                order_id,
                driver_id: driver.id,
                delivery_date: now,
                delivery_time: now.time(),
                delivery_status: DeliveryStatus::Pending,
            })
            .await
            .map_err(|e| e.to_string())?;

        self.summary(order_id)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("{order_id} vanished"))
    }

    async fn assign_driver(&self) -> Result<Driver, String> {
        let drivers = self.stores.drivers.all().await.map_err(|e| e.to_string())?;
        let active = self.stores.deliveries.active().await.map_err(|e| e.to_string())?;

        if let Some(id) = select_driver(&drivers, &active) {
            if let Some(driver) = drivers.into_iter().find(|d| d.id == id) {
                return Ok(driver);
            }
        }

        warn!("No drivers registered, creating a stand-in driver");
        let id = self
            .stores
            .drivers
            .create_driver(DriverCreate::emergency())
            .await
            .map_err(|e| e.to_string())?;
        self.stores
            .drivers
            .get(id)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("{id} vanished"))
    }

    async fn compensate(&self, order_id: OrderId) {
        match self.stores.orders.delete(order_id).await {
            Ok(()) => info!(%order_id, "Partial order removed"),
            Err(e) => error!(%order_id, error = %e, "Compensating delete failed"),
        }
    }

    async fn notify(
        &self,
        account: &Account,
        summary: &OrderSummary,
        priced: &[(Product, u32)],
    ) -> bool {
        let confirmation = OrderConfirmation {
            order: &summary.order,
            restaurant_name: summary
                .restaurant
                .as_ref()
                .map(|r| r.name.as_str())
                .unwrap_or_default(),
            lines: priced
                .iter()
                .map(|(product, quantity)| ConfirmationLine {
                    product_name: product.name.clone(),
                    quantity: *quantity,
                    unit_price: product.price,
                })
                .collect(),
            driver_name: summary
                .driver
                .as_ref()
                .map(|d| d.name.as_str())
                .unwrap_or_default(),
        };

        match self.mailer.send(confirmation.render(&account.email)).await {
            Ok(()) => true,
            Err(e) => {
                warn!(order_id = %summary.order.id, error = %e, "Order confirmation not sent");
                false
            }
        }
    }
}
