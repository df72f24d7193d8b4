use super::{TokenError, ValidationErrors};
use crate::model::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    #[error("Invalid form: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account inactive")]
    AccountInactive,

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Invalid activation link: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Store unavailable: {0}")]
    Store(String),
}
