//! Error types for the Order item actor.

use thiserror::Error;

/// Errors that can occur during order item operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderItemError {
    /// The requested order item was not found.
    #[error("Order item not found: {0}")]
    NotFound(String),

    #[error("Order item conflicts with {0}")]
    Conflict(String),

    /// The order item data provided is invalid.
    #[error("Order item validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_store_error!(OrderItemError);
