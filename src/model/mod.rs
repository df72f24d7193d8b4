//! Records kept by the resource actors, with their create/update payloads.
//!
//! Every record implements [`ActorEntity`](resource_actor::ActorEntity) in its
//! `*_actor` module; this module only holds the data and the invariants that
//! can be checked without talking to another store.

/// Declares a type-safe `u32` identifier.
///
/// Ids serialize as bare numbers and display with a record prefix
/// (`order_3`), which is what the actors put in their logs.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub(crate) use entity_id;

pub mod account;
pub mod client;
pub mod delivery;
pub mod driver;
pub mod order;
pub mod order_item;
pub mod product;
pub mod restaurant;
pub mod review;

pub use account::*;
pub use client::*;
pub use delivery::*;
pub use driver::*;
pub use order::*;
pub use order_item::*;
pub use product::*;
pub use restaurant::*;
pub use review::*;

use rust_decimal::Decimal;

/// Currency and ratings are kept with two decimal places.
pub(crate) fn money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// `Err` with `message` when `value` is blank.
pub(crate) fn required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}
