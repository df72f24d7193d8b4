//! # Session Cart
//!
//! [`Cart`] is the value object stored in the session: product ids with
//! positive quantities, in insertion order. [`CartService`] applies the user's
//! cart operations to it, checking products against the catalog and producing
//! the flash message shown after the redirect.

mod error;
mod service;
mod value;

pub use error::CartError;
pub use service::{CartLineView, CartService, CartView};
pub use value::{parse_quantity, Cart, CartLine};
