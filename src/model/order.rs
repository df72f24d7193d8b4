//! Customer orders.
//!
//! [`Order`] implements [`ActorEntity`](resource_actor::ActorEntity) in
//! [`order_actor`](crate::order_actor); deleting an order cascades to its
//! items, its delivery and its reviews.
use super::{entity_id, ClientId, RestaurantId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

entity_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    #[default]
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Cash => "Cash",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub restaurant_id: RestaurantId,
    /// Set by the store; never changes.
    pub creation_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Sum of the items at creation; never updated.
    pub total: Decimal,
    pub delivery_date: DateTime<Utc>,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub comments: String,
}

#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub client_id: ClientId,
    pub restaurant_id: RestaurantId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub delivery_date: DateTime<Utc>,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub comments: String,
}

/// Changes allowed after placement. The total and creation date are not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_address: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub comments: Option<String>,
}
