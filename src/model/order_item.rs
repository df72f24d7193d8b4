use super::{entity_id, OrderId, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;

entity_id!(
    /// Type-safe identifier for OrderItems.
    OrderItemId,
    "order_item"
);

/// One line of a placed order.
///
/// `unit_price` is the product price at placement. It is never read back from
/// the product, so later price changes leave past orders untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct OrderItemCreate {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Order items are immutable once written.
#[derive(Debug, Clone)]
pub enum OrderItemUpdate {}
