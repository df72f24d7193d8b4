//! # ActorClient Trait
//!
//! Common read/delete operations for record-specific client wrappers, built on
//! top of a generic [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard operations.
///
/// A wrapper only supplies access to its inner [`ResourceClient`] and a
/// mapping from [`FrameworkError`] into its own error type; `get`, `all` and
/// `delete` come for free.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Courier { id: u32 }
/// #[derive(Debug)] struct CourierCreate;
/// #[derive(Debug)] struct CourierUpdate;
/// #[derive(Debug)] enum CourierAction {}
/// #[derive(Debug, thiserror::Error)] #[error("courier: {0}")] struct CourierError(String);
///
/// #[async_trait]
/// impl ActorEntity for Courier {
///     type Id = u32;
///     type Create = CourierCreate;
///     type Update = CourierUpdate;
///     type Action = CourierAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CourierError;
///
///     fn from_create_params(id: u32, _: CourierCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: CourierUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CourierAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct CourierClient { inner: ResourceClient<Courier> }
///
/// #[async_trait]
/// impl ActorClient<Courier> for CourierClient {
///     type Error = CourierError;
///     fn inner(&self) -> &ResourceClient<Courier> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { CourierError(e.to_string()) }
/// }
///
/// async fn usage(client: CourierClient) {
///     let _ = client.get(1).await;
///     let _ = client.all().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the record-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every record, in ascending id order.
    #[tracing::instrument(skip(self))]
    async fn all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list_all().await.map_err(Self::map_error)
    }

    /// Delete a record by id, running its cascades.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
