use super::{entity_id, DriverId, OrderId};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Deliveries.
    DeliveryId,
    "delivery"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    /// Deliveries that still occupy their driver.
    pub fn is_active(self) -> bool {
        matches!(self, DeliveryStatus::Pending | DeliveryStatus::InTransit)
    }
}

/// The dispatch of one order to one driver. At most one per order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub order_id: OrderId,
    pub driver_id: DriverId,
    pub delivery_date: DateTime<Utc>,
    pub delivery_time: NaiveTime,
    pub delivery_status: DeliveryStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryCreate {
    pub order_id: OrderId,
    pub driver_id: DriverId,
    pub delivery_date: DateTime<Utc>,
    pub delivery_time: NaiveTime,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryUpdate {
    pub driver_id: Option<DriverId>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_time: Option<NaiveTime>,
    pub delivery_status: Option<DeliveryStatus>,
}
