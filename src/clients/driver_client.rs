//! # Driver Client
use crate::driver_actor::DriverError;
use crate::model::Driver;

crate::resource_client!(
    /// Client for the Driver store.
    DriverClient,
    Driver,
    DriverError,
    driver
);
