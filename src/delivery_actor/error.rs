//! Error types for the Delivery actor.

use thiserror::Error;

/// Errors that can occur during delivery operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    /// The requested delivery was not found.
    #[error("Delivery not found: {0}")]
    NotFound(String),

    /// The order already has a delivery.
    #[error("Order already dispatched as {0}")]
    Conflict(String),

    /// The delivery data provided is invalid.
    #[error("Delivery validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_store_error!(DeliveryError);
