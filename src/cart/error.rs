use crate::model::ProductId;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Store(#[from] ProductError),
}
