//! # Notification
//!
//! Outgoing email. Every sender implements [`Mailer`]; callers get a
//! `Result` back and decide for themselves whether a failure matters. Order
//! confirmation never does: checkout logs the error and reports
//! `notified = false`.
//!
//! - [`SmtpMailer`] - relays through an SMTP server (lettre)
//! - [`LogMailer`] - writes the message to the log; used without SMTP settings
//! - [`MemoryMailer`] - keeps sent messages in memory for tests

mod confirmation;
mod error;
mod memory;
mod smtp;

pub use confirmation::*;
pub use error::NotificationError;
pub use memory::{LogMailer, MemoryMailer};
pub use smtp::SmtpMailer;

use async_trait::async_trait;

/// A rendered plain-text email.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), NotificationError>;
}
