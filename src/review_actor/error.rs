//! Error types for the Review actor.

use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    /// The requested review was not found.
    #[error("Review not found: {0}")]
    NotFound(String),

    #[error("Review conflicts with {0}")]
    Conflict(String),

    /// The review data provided is invalid.
    #[error("Review validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_store_error!(ReviewError);
