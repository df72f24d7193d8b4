use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Failed to send email: {0}")]
    Transport(String),
}
