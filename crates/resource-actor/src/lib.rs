//! # Resource Actor
//!
//! In-memory record stores, one per record type, each owned by a Tokio task and
//! reached through a cloneable, typed client. Every request to a store is
//! processed sequentially, so a single create/update/delete is atomic without
//! locks, and listing always yields records in ascending id order.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the record, its payloads and its hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]): the ordered store and request loop.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to the constructor.
//! All stores are created first, then each is started with the clients of the
//! stores it cascades into:
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Menu { id: u32 }
//! #[derive(Debug)] struct MenuCreate;
//! #[derive(Debug)] struct MenuUpdate;
//! #[derive(Debug)] enum MenuAction {}
//! #[derive(Debug, thiserror::Error)] #[error("menu")] struct MenuError;
//!
//! #[derive(Clone, Debug)] struct Kitchen { id: u32 }
//! #[derive(Debug)] struct KitchenCreate;
//! #[derive(Debug)] struct KitchenUpdate;
//! #[derive(Debug)] enum KitchenAction {}
//! #[derive(Debug, thiserror::Error)] #[error("kitchen")] struct KitchenError;
//!
//! #[async_trait]
//! impl ActorEntity for Menu {
//!     type Id = u32; type Create = MenuCreate; type Update = MenuUpdate; type Action = MenuAction;
//!     type ActionResult = (); type Context = (); type Error = MenuError;
//!     fn from_create_params(id: u32, _: MenuCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: MenuUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: MenuAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Kitchen {
//!     type Id = u32; type Create = KitchenCreate; type Update = KitchenUpdate; type Action = KitchenAction;
//!     type ActionResult = (); type Context = ResourceClient<Menu>; type Error = KitchenError;
//!     fn from_create_params(id: u32, _: KitchenCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: KitchenUpdate, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: KitchenAction, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//!     async fn on_delete(&self, menus: &Self::Context) -> Result<(), Self::Error> {
//!         // Cascade: drop every menu along with the kitchen.
//!         for menu in menus.list_all().await.map_err(|_| KitchenError)? {
//!             menus.delete(menu.id).await.map_err(|_| KitchenError)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (menu_actor, menus) = ResourceActor::<Menu>::new(10);
//!     let (kitchen_actor, kitchens) = ResourceActor::<Kitchen>::new(10);
//!     tokio::spawn(menu_actor.run(()));
//!     tokio::spawn(kitchen_actor.run(menus.clone()));
//!
//!     let kitchen = kitchens.create(KitchenCreate).await.unwrap();
//!     menus.create(MenuCreate).await.unwrap();
//!     kitchens.delete(kitchen).await.unwrap();
//!     assert!(menus.list_all().await.unwrap().is_empty());
//! }
//! ```
//!
//! Cascades must form an acyclic graph: a store blocked in a hook cannot answer
//! a request sent back to it.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a client's requests from canned expectations,
//! for failure injection without a live store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
