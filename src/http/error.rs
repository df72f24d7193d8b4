use crate::account_actor::AccountError;
use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::client_actor::ClientError;
use crate::delivery_actor::DeliveryError;
use crate::driver_actor::DriverError;
use crate::identity::{IdentityError, ValidationErrors};
use crate::order_actor::OrderError;
use crate::order_item_actor::OrderItemError;
use crate::product_actor::ProductError;
use crate::restaurant_actor::RestaurantError;
use crate::review_actor::ReviewError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Field used for errors that belong to no single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthenticated() -> Self {
        AppError::Unauthorized("Authentication credentials were not provided.".to_string())
    }

    pub fn invalid(field: &str, message: &str) -> Self {
        AppError::Validation(ValidationErrors::single(field, message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            AppError::Internal(detail) => {
                error!(%detail, "Request failed");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Store errors share one shape; map them all the same way.
macro_rules! from_store_error {
    ($($error:ident),+ $(,)?) => {
        $(
            impl From<$error> for AppError {
                fn from(e: $error) -> Self {
                    match e {
                        $error::NotFound(id) => AppError::NotFound(id),
                        $error::Conflict(id) => AppError::Conflict(format!("conflicts with {id}")),
                        $error::ValidationError(msg) => AppError::invalid(NON_FIELD_ERRORS, &msg),
                        $error::ActorCommunicationError(msg) => AppError::Internal(msg),
                    }
                }
            }
        )+
    };
}

from_store_error!(
    RestaurantError,
    ProductError,
    ClientError,
    OrderError,
    OrderItemError,
    DriverError,
    DeliveryError,
    ReviewError,
    AccountError,
);

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::ProductNotFound(id) => AppError::NotFound(id.to_string()),
            CartError::Store(e) => e.into(),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::EmptyCart => AppError::BadRequest(e.to_string()),
            CheckoutError::ProductNotFound(id) => AppError::NotFound(id.to_string()),
            CheckoutError::Unavailable { .. } | CheckoutError::Validation(_) => {
                AppError::invalid("items", &e.to_string())
            }
            CheckoutError::Store(_) | CheckoutError::WorkflowFailed(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::Validation(errors) => AppError::Validation(errors),
            IdentityError::InvalidCredentials => AppError::Unauthorized("invalid credentials".to_string()),
            IdentityError::AccountInactive => AppError::Forbidden("account inactive".to_string()),
            IdentityError::AccountNotFound(id) => AppError::NotFound(id.to_string()),
            IdentityError::InvalidToken(_) => AppError::BadRequest(e.to_string()),
            IdentityError::Hashing(_) | IdentityError::Store(_) => AppError::Internal(e.to_string()),
        }
    }
}
