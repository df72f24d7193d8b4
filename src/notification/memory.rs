use super::{Mailer, NotificationError, OutgoingEmail};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Logs every message instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), NotificationError> {
        info!(to = %email.to, subject = %email.subject, "Email (not sent, SMTP disabled)");
        debug!(body = %email.body);
        Ok(())
    }
}

/// Records messages in memory. Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<OutgoingEmail>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `send` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Transport(format!(
                "mailbox for {} unreachable",
                email.to
            )));
        }
        self.outbox.lock().await.push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "ana@example.com".to_string(),
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_mailer_records_and_fails_on_demand() {
        let mailer = MemoryMailer::new();
        mailer.send(email()).await.unwrap();

        mailer.set_failing(true);
        assert!(matches!(
            mailer.send(email()).await,
            Err(NotificationError::Transport(_))
        ));

        assert_eq!(mailer.sent().await, vec![email()]);
    }
}
