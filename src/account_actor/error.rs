//! Error types for the Account actor.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The username or email is held by another account.
    #[error("Username or email already used by {0}")]
    Conflict(String),

    /// The account data provided is invalid.
    #[error("Account validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_store_error!(AccountError);
