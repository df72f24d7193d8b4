//! # Generic Actor Server
//!
//! The `ResourceActor` owns the store for one record type and processes every
//! request for it sequentially, so each individual operation is atomic without
//! locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// This is the "server" half: it owns the ordered `store` and the receiving
/// end of the channel. The [`ResourceClient`] returned by [`ResourceActor::new`]
/// is the cheap, cloneable "client" half.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Table { id: u32, seats: u8 }
/// #[derive(Debug)] struct TableCreate { seats: u8 }
/// #[derive(Debug)] struct TableUpdate;
/// #[derive(Debug)] enum TableAction {}
/// #[derive(Debug)] struct TableError;
///
/// impl std::fmt::Display for TableError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "table error") }
/// }
/// impl std::error::Error for TableError {}
///
/// #[async_trait]
/// impl ActorEntity for Table {
///     type Id = u32;
///     type Create = TableCreate;
///     type Update = TableUpdate;
///     type Action = TableAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TableError;
///
///     fn from_create_params(id: u32, p: TableCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, seats: p.seats })
///     }
///     async fn on_update(&mut self, _: TableUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: TableAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Table>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(TableCreate { seats: 4 }).await.unwrap();
///     assert_eq!(client.list_all().await.unwrap().len(), 1);
///     assert_eq!(client.get(id).await.unwrap().unwrap().seats, 4);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: allocate the next id, build the record, reject it if it
///   [conflicts](ActorEntity::conflicts_with) with a stored one, run
///   `on_create`, insert.
/// * **Get**: clone of the record, or `None`.
/// * **List**: clones of every record matching the optional filter, in
///   ascending id order.
/// * **Update**: run `on_update` against a copy, re-check conflicts, then
///   replace the stored record and return the new state.
/// * **Delete**: run `on_delete` (cascades), then remove.
/// * **Action**: run `handle_action` against the stored record.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when
    /// it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is handed to every hook of every record.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };

                    if let Some((existing_id, _)) =
                        self.store.iter().find(|(_, existing)| item.conflicts_with(existing))
                    {
                        warn!(entity_type, %existing_id, "Create conflicts with stored item");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(existing_id.to_string())));
                        continue;
                    }

                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    // Ids of rejected creates are not consumed.
                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.as_ref().map_or(true, |f| f.matches(item)))
                        .cloned()
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(stored) = self.store.get(&id) {
                        // Work on a copy so a rejected update leaves the record untouched.
                        let mut item = stored.clone();
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        if let Some((existing_id, _)) = self
                            .store
                            .iter()
                            .find(|(other_id, existing)| **other_id != id && item.conflicts_with(existing))
                        {
                            warn!(entity_type, %id, %existing_id, "Update conflicts with stored item");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(existing_id.to_string())));
                            continue;
                        }
                        self.store.insert(id.clone(), item.clone());
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
