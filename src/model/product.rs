use super::{entity_id, money, RestaurantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

/// A dish offered by one restaurant.
///
/// Only orderable while `availability` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub availability: bool,
}

impl Product {
    /// Price of `quantity` units at the current price.
    pub fn subtotal(&self, quantity: u32) -> Decimal {
        self.price * Decimal::from(quantity)
    }
}

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default = "available_by_default")]
    pub availability: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub availability: Option<bool>,
}

pub fn validate_price(price: Decimal) -> Result<Decimal, String> {
    if price.is_sign_negative() {
        return Err(format!("price {price} must not be negative"));
    }
    Ok(money(price))
}
