//! # System Lifecycle
//!
//! Starts one resource actor per record type, wires the cascade contexts and
//! shuts everything down again.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created first and receive their dependencies in `run(context)`.
//! The contexts only point "down" the ownership tree, so the graph stays
//! acyclic and every actor stops once the clients above it are gone:
//!
//! ```text
//! Restaurant -> Product, Order, Review
//! Client     -> Order, Review
//! Product    -> OrderItem
//! Order      -> OrderItem, Delivery, Review
//! Driver     -> Delivery
//! Account, OrderItem, Delivery, Review -> ()
//! ```
//!
//! ## Graceful Shutdown
//!
//! [`DeliverySystem::shutdown`] drops the clients it holds and awaits every
//! actor task. Any other clone of [`Stores`] (the HTTP state, for instance)
//! must be dropped first or the matching actors keep running.

pub mod delivery_system;

pub use delivery_system::*;
