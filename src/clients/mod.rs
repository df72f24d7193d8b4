//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient),
//! one per store.
//!
//! Callers never build request messages; they call `create_product`,
//! `find`, `activate` and so on, and get the store's own error type back.

mod macros;

pub mod account_client;
pub mod client_client;
pub mod delivery_client;
pub mod driver_client;
pub mod order_client;
pub mod order_item_client;
pub mod product_client;
pub mod restaurant_client;
pub mod review_client;

pub use account_client::*;
pub use client_client::*;
pub use delivery_client::*;
pub use driver_client::*;
pub use order_client::*;
pub use order_item_client::*;
pub use product_client::*;
pub use restaurant_client::*;
pub use review_client::*;

pub use resource_actor::ActorClient;
