use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("{name} is not available right now")]
    Unavailable { id: ProductId, name: String },

    #[error("Invalid order: {0}")]
    Validation(String),

    /// A lookup failed before anything was written.
    #[error("Store unavailable: {0}")]
    Store(String),

    /// A write failed; the partial order has been removed.
    #[error("Order could not be placed: {0}")]
    WorkflowFailed(String),
}
