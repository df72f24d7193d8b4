use super::entity_id;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Drivers.
    DriverId,
    "driver"
);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_type: String,
    pub availability: bool,
}

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverCreate {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default = "available_by_default")]
    pub availability: bool,
}

impl DriverCreate {
    /// Stand-in driver used when checkout finds nobody to dispatch.
    pub fn emergency() -> Self {
        Self {
            name: "Assigned Driver".to_string(),
            email: "driver@example.com".to_string(),
            phone_number: String::new(),
            vehicle_type: "Motorbike".to_string(),
            availability: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub availability: Option<bool>,
}
