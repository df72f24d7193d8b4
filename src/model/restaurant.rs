use super::{entity_id, money};
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Restaurants.
    RestaurantId,
    "restaurant"
);

/// A restaurant of the catalog. Owns many [`Product`](super::Product)s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    /// Two decimal places, below 100.
    pub rating: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub rating: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub rating: Option<Decimal>,
}

/// Ratings are `DECIMAL(4, 2)`: non-negative and below 100.
pub fn validate_rating(rating: Decimal) -> Result<Decimal, String> {
    let rating = money(rating);
    if rating.is_sign_negative() || rating >= Decimal::ONE_HUNDRED {
        return Err(format!("rating {rating} must be between 0 and 99.99"));
    }
    Ok(rating)
}
