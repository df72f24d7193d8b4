//! Error types for the Driver actor.

use thiserror::Error;

/// Errors that can occur during driver operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DriverError {
    /// The requested driver was not found.
    #[error("Driver not found: {0}")]
    NotFound(String),

    #[error("Driver conflicts with {0}")]
    Conflict(String),

    /// The driver data provided is invalid.
    #[error("Driver validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_store_error!(DriverError);
