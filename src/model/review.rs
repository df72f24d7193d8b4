use super::{entity_id, ClientId, OrderId, RestaurantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Reviews.
    ReviewId,
    "review"
);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub client_id: ClientId,
    pub restaurant_id: RestaurantId,
    pub order_id: OrderId,
    /// A single digit, 0 to 9.
    pub rating: u8,
    pub comment: String,
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub client_id: ClientId,
    pub restaurant_id: RestaurantId,
    pub order_id: OrderId,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

pub const MAX_REVIEW_RATING: u8 = 9;

pub fn validate_review_rating(rating: u8) -> Result<u8, String> {
    if rating > MAX_REVIEW_RATING {
        return Err(format!("rating {rating} must be a single digit"));
    }
    Ok(rating)
}
