use super::{Mailer, NotificationError, OutgoingEmail};
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

/// Sends through an SMTP relay. The transport is blocking, so each send runs
/// on Tokio's blocking pool.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, NotificationError> {
        let from: Mailbox = from
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(from.to_string()))?;
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| NotificationError::Transport(format!("Wrong smtp transport: {e}")))?
            .credentials(creds)
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: OutgoingEmail) -> Result<(), NotificationError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(email.to.clone()))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| NotificationError::Build(e.to_string()))?;

        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| NotificationError::Transport(format!("send task failed: {e}")))?
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        info!("Email sent");
        Ok(())
    }
}
