//! # Observability
//!
//! Structured logging shared by every binary built on the stores.
//!
//! Every actor logs with an `entity_type` field, so targets are hidden to keep
//! lines short:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO checkout: Created entity_type="Order" id=order_1 size=1
//! INFO checkout: Created entity_type="Delivery" id=delivery_1 size=1
//! ```
//!
//! Verbosity follows `RUST_LOG` (`info` by default). Create/Update payloads are
//! logged at `debug`.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Safe to call more than once; later calls are ignored, which keeps tests
/// that build several systems from panicking.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
