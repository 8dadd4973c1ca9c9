use async_trait::async_trait;
use lettre::message::{Mailbox, Mailboxes, MultiPart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::NotifyError;
use crate::request::OutgoingEmail;
use crate::settings::MailSettings;

/// Sends one message per call
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, settings: &MailSettings, email: &OutgoingEmail) -> Result<(), NotifyError>;
}

/// STARTTLS SMTP sender. Opens a fresh authenticated session per message.
#[derive(Debug, Default, Clone)]
pub struct SmtpMailer;

impl SmtpMailer {
    pub fn new() -> Self {
        Self
    }

    pub fn build_message(email: &OutgoingEmail) -> Result<Message, NotifyError> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|e| NotifyError::Transport(format!("Invalid from address: {}", e)))?;
        let to: Mailboxes = email
            .recipient_header()
            .parse()
            .map_err(|e| NotifyError::Transport(format!("Invalid recipient list: {}", e)))?;

        let builder = Message::builder()
            .from(from)
            .mailbox(header::To::from(to))
            .subject(email.subject.as_str())
            .message_id(Some(email.message_id.clone()));

        let message = match (email.text.clone(), email.html.clone()) {
            (Some(text), Some(html)) => {
                builder.multipart(MultiPart::alternative_plain_html(text, html))
            }
            (None, Some(html)) => builder.header(header::ContentType::TEXT_HTML).body(html),
            (text, None) => builder
                .header(header::ContentType::TEXT_PLAIN)
                .body(text.unwrap_or_default()),
        };

        message.map_err(|e| NotifyError::Transport(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, settings: &MailSettings, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let message = Self::build_message(email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.app_password.clone(),
            ))
            .build();

        debug!(host = %settings.smtp_host, port = settings.smtp_port, "Opening SMTP session");

        let response = transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!(
            positive = response.is_positive(),
            message_id = %email.message_id,
            "SMTP server accepted message"
        );

        Ok(())
    }
}
