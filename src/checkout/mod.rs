//! # Checkout
//!
//! Turns a cart into a placed order:
//!
//! 1. resolve every line to a live, available product (nothing is written
//!    if one is missing or unavailable)
//! 2. take the restaurant of the first line
//! 3. resolve the customer through the account's client link
//! 4. price the lines at the current product prices
//! 5. write the order and its items
//! 6. pick the least loaded driver
//! 7. write the delivery
//! 8. send the confirmation email (best effort)
//!
//! A write failure in steps 5 to 7 deletes the order again, which cascades to
//! whatever items and delivery were already written. The caller's cart is
//! cleared only once the order is complete.

mod dispatch;
mod error;
mod service;

pub use dispatch::select_driver;
pub use error::CheckoutError;
pub use service::{CheckoutForm, CheckoutService, OrderSummary, Receipt};
