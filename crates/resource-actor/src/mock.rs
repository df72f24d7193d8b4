//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a store. Code that takes a
//! client (a checkout workflow, a cascade hook) can then be driven into failure
//! paths that a live actor would rarely produce.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, canned replies | Real records |
//! | **Use Case** | Logic *around* the client | The store itself, or the whole system |
//! | **Error Injection** | `return_err` | Needs the right stored data |
//!
//! ## Testing Strategies
//!
//! 1. **Pure mock**: every dependency is a `MockClient`.
//! 2. **Single actor**: spawn one `ResourceActor` with a `()` context.
//! 3. **Mixed**: real stores for most records, one mocked store to inject a
//!    failure (e.g. a delivery store that refuses every create).
//! 4. **Full system**: start everything and drive it through its clients.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Rider { id: u32 }
//! #[derive(Debug)] struct RiderCreate;
//! #[derive(Debug)] struct RiderUpdate;
//! #[derive(Debug)] enum RiderAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct RiderError;
//!
//! #[async_trait]
//! impl ActorEntity for Rider {
//!     type Id = u32; type Create = RiderCreate; type Update = RiderUpdate;
//!     type Action = RiderAction; type ActionResult = (); type Context = (); type Error = RiderError;
//!     fn from_create_params(id: u32, _: RiderCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: RiderUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: RiderAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Rider>::new();
//!     mock.expect_list().return_ok(vec![Rider { id: 1 }]);
//!     mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.list_all().await.unwrap().len(), 1);
//!     assert!(matches!(client.create(RiderCreate).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For assertions on the request payloads themselves, use
//! [`create_mock_client`] and the `expect_*` receiver helpers.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the reply it receives.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("expectation queue poisoned")
        .push_back(expectation);
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered; a
/// request of the wrong kind or for the wrong id stops the mock, and the
/// caller sees [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "get for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "update for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        assert_eq!(id, want, "delete for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "action for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    /// Expects a `list` or `list_all`; the filter is not applied to the reply.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Action { id, response })
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Completes an expectation with its reply.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    queue: Queue<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        queue: &Queue<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            queue: queue.clone(),
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        push(&self.queue, (self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.queue, (self.build)(Err(error)));
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// The test answers each request through its `respond_to` channel, so it can
/// inspect payloads and delay or fail replies deterministically.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Delete request.
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, tokio::sync::oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: u32,
        name: String,
        available: bool,
    }

    #[derive(Debug)]
    struct DishCreate {
        name: String,
    }

    #[derive(Debug)]
    struct DishUpdate;

    #[derive(Debug)]
    enum DishAction {
        Withdraw,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Dish error")]
    struct DishError;

    #[async_trait]
    impl ActorEntity for Dish {
        type Id = u32;
        type Create = DishCreate;
        type Update = DishUpdate;
        type Action = DishAction;
        type ActionResult = bool;
        type Context = ();
        type Error = DishError;

        fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
                available: true,
            })
        }

        async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: DishAction, _: &()) -> Result<bool, Self::Error> {
            let was = self.available;
            self.available = false;
            Ok(was)
        }
    }

    fn dish(id: u32, name: &str) -> Dish {
        Dish {
            id,
            name: name.to_string(),
            available: true,
        }
    }

    #[tokio::test]
    async fn receiver_helpers_see_payloads() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(DishCreate {
                    name: "Ramen".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Ramen");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn expectations_answer_in_order() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(dish(1, "Ramen")));
        mock.expect_list().return_ok(vec![dish(1, "Ramen"), dish(2, "Gyoza")]);
        mock.expect_action(1).return_ok(true);
        mock.expect_delete(1).return_ok(());

        let client = mock.client();
        let id = client
            .create(DishCreate {
                name: "Ramen".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().name, "Ramen");
        assert_eq!(client.list_all().await.unwrap().len(), 2);
        assert!(client.perform_action(1, DishAction::Withdraw).await.unwrap());
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn injected_errors_reach_the_caller() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_update(3)
            .return_err(FrameworkError::NotFound("3".to_string()));

        let err = mock.client().update(3, DishUpdate).await.unwrap_err();
        assert!(err.is_not_found());
        mock.verify();
    }

    #[tokio::test]
    async fn unexpected_request_drops_the_reply() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_create().return_ok(1);

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
