//! # ActorEntity Trait
//!
//! The contract every stored record (restaurant, order, delivery, account, …)
//! implements to be kept by a [`ResourceActor`](crate::ResourceActor). It names
//! the id, the create/update payloads, the custom actions, the injected context
//! and the error type, and provides lifecycle hooks around each mutation.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults do nothing, so a plain record only implements
//! `from_create_params`, `on_update` and `handle_action`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors (cascading deletes, lookups).
/// The `Context` is handed to [`ResourceActor::run`](crate::ResourceActor::run)
/// rather than to the constructor, so two stores may reference each other's
/// clients without a construction cycle.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    ///
    /// Ids are allocated from a per-store `u32` counter and kept in an ordered
    /// map, so listing always yields records in ascending id order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing record-specific operations (e.g. `Activate`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per store rather than one per message.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the allocated id and the payload.
    /// Called synchronously before `on_create`; reject invalid payloads here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `self` may not coexist with an already stored record.
    ///
    /// Checked by the actor against every stored record before insertion, so
    /// uniqueness (one delivery per order, one account per email) holds
    /// without a read-then-write race.
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed. Cascades live here.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
