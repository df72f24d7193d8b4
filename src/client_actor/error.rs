//! Error types for the Client actor.

use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The requested client was not found.
    #[error("Client not found: {0}")]
    NotFound(String),

    /// Another stored client already holds a unique value.
    #[error("Client conflicts with {0}")]
    Conflict(String),

    /// The client data provided is invalid.
    #[error("Client validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_store_error!(ClientError);
