//! # Food Delivery
//!
//! Customers browse restaurants and menus, fill a session cart and check out;
//! checkout records the order with price snapshots, assigns the least busy
//! driver, creates the delivery and emails a confirmation. Accounts register
//! with an emailed activation link. A REST API exposes the same records.
//!
//! ## Layers
//!
//! ### 1. Stores ([`restaurant_actor`], [`product_actor`], [`order_actor`], ...)
//! One [`ResourceActor`](resource_actor::ResourceActor) per record type keeps
//! the records in memory and processes requests one at a time. Deleting a
//! record cascades to its dependents through the actor's context.
//!
//! ### 2. Clients ([`clients`])
//! Typed wrappers such as [`OrderClient`](clients::OrderClient) hide the
//! message passing and return each store's own error type.
//!
//! ### 3. Services ([`cart`], [`checkout`], [`identity`], [`notification`])
//! The business workflows, written against the clients only.
//!
//! ### 4. Wiring ([`lifecycle`], [`config`], [`http`])
//! [`DeliverySystem`](lifecycle::DeliverySystem) starts and stops the
//! stores; [`http::router`] puts the pages and the REST API on top.
//!
//! ## Testing
//!
//! Services can run against [`resource_actor::mock::MockClient`] instead of
//! live stores, which is how failure paths such as a delivery store refusing
//! writes are exercised.

pub mod account_actor;
pub mod cart;
pub mod checkout;
pub mod client_actor;
pub mod clients;
pub mod config;
pub mod delivery_actor;
pub mod driver_actor;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod model;
pub mod notification;
pub mod order_actor;
pub mod order_item_actor;
pub mod product_actor;
pub mod restaurant_actor;
pub mod review_actor;
pub mod session;
