//! Driver selection.
//!
//! The least loaded available driver wins; load is the number of deliveries
//! still pending or in transit. When nobody is available every driver is
//! considered. Ties go to the lowest driver id.

use crate::model::{Delivery, Driver, DriverId};
use std::collections::HashMap;

/// `None` only when there are no drivers at all.
pub fn select_driver(drivers: &[Driver], deliveries: &[Delivery]) -> Option<DriverId> {
    let mut load: HashMap<DriverId, usize> = HashMap::new();
    for delivery in deliveries.iter().filter(|d| d.delivery_status.is_active()) {
        *load.entry(delivery.driver_id).or_default() += 1;
    }

    least_loaded(drivers.iter().filter(|d| d.availability), &load)
        .or_else(|| least_loaded(drivers.iter(), &load))
}

fn least_loaded<'a>(
    pool: impl Iterator<Item = &'a Driver>,
    load: &HashMap<DriverId, usize>,
) -> Option<DriverId> {
    pool.map(|d| (load.get(&d.id).copied().unwrap_or(0), d.id))
        .min()
        .map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeliveryId, DeliveryStatus, OrderId};
    use chrono::{NaiveTime, Utc};

    fn driver(id: u32, availability: bool) -> Driver {
        Driver {
            id: DriverId(id),
            name: format!("D{id}"),
            email: String::new(),
            phone_number: String::new(),
            vehicle_type: "Bike".to_string(),
            availability,
        }
    }

    fn delivery(id: u32, driver: u32, status: DeliveryStatus) -> Delivery {
        Delivery {
            id: DeliveryId(id),
            order_id: OrderId(id),
            driver_id: DriverId(driver),
            delivery_date: Utc::now(),
            delivery_time: NaiveTime::MIN,
            delivery_status: status,
        }
    }

    #[test]
    fn test_picks_least_loaded_available_driver() {
        let drivers = [driver(1, true), driver(2, true), driver(3, false)];
        let deliveries = [
            delivery(1, 1, DeliveryStatus::Pending),
            delivery(2, 1, DeliveryStatus::InTransit),
        ];
        assert_eq!(select_driver(&drivers, &deliveries), Some(DriverId(2)));
    }

    #[test]
    fn test_finished_deliveries_do_not_count() {
        let drivers = [driver(1, true), driver(2, true)];
        let deliveries = [
            delivery(1, 1, DeliveryStatus::Delivered),
            delivery(2, 1, DeliveryStatus::Failed),
            delivery(3, 2, DeliveryStatus::Pending),
        ];
        assert_eq!(select_driver(&drivers, &deliveries), Some(DriverId(1)));
    }

    #[test]
    fn test_ties_go_to_lowest_id() {
        let drivers = [driver(5, true), driver(3, true), driver(4, true)];
        assert_eq!(select_driver(&drivers, &[]), Some(DriverId(3)));
    }

    #[test]
    fn test_falls_back_to_unavailable_drivers() {
        let drivers = [driver(1, false), driver(2, false)];
        let deliveries = [delivery(1, 1, DeliveryStatus::Pending)];
        assert_eq!(select_driver(&drivers, &deliveries), Some(DriverId(2)));
    }

    #[test]
    fn test_no_drivers() {
        assert_eq!(select_driver(&[], &[]), None);
    }
}
