pub mod address;
pub mod error;
pub mod mailer;
pub mod request;
pub mod settings;

pub use error::NotifyError;
pub use mailer::{Mailer, SmtpMailer};
pub use request::{EmailRequest, EmailResult, OutgoingEmail};
pub use settings::{MailCredentials, MailSettings};

use std::sync::Arc;
use tracing::{error, info};

/// Validates an email request and hands it to the mail transport
#[derive(Clone)]
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    credentials: MailCredentials,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, credentials: MailCredentials) -> Self {
        Self {
            mailer,
            credentials,
        }
    }

    pub fn smtp(credentials: MailCredentials) -> Self {
        Self::new(Arc::new(SmtpMailer::new()), credentials)
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.validate().is_ok()
    }

    /// Request checks run first, then credential checks, then one send.
    pub async fn dispatch(&self, request: &EmailRequest) -> Result<EmailResult, NotifyError> {
        request.validate()?;
        let settings = self.credentials.validate()?;

        let email = OutgoingEmail::from_request(request, &settings.from);
        info!(
            recipients = email.to.len(),
            has_text = email.text.is_some(),
            has_html = email.html.is_some(),
            "Sending email"
        );

        if let Err(e) = self.mailer.send(&settings, &email).await {
            error!(error = %e, "Email send failed");
            return Err(e);
        }

        Ok(EmailResult {
            success: true,
            message_id: email.message_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, _settings: &MailSettings, email: &OutgoingEmail) -> Result<(), NotifyError> {
            if let Some(message) = &self.fail_with {
                return Err(NotifyError::Transport(message.clone()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn credentials() -> MailCredentials {
        MailCredentials::new(
            Some("notes@gmail.com".to_string()),
            Some("abcdefghijklmnop".to_string()),
            Some("notes@gmail.com".to_string()),
        )
    }

    fn request(to: &[&str]) -> EmailRequest {
        EmailRequest {
            to: to.iter().map(|s| s.to_string()).collect(),
            subject: "Meeting Summary".to_string(),
            text: Some("Summary:\nok".to_string()),
            html: None,
        }
    }

    #[tokio::test]
    async fn sends_one_message_and_returns_its_id() {
        let mailer = Arc::new(RecordingMailer::default());
        let dispatcher = Dispatcher::new(mailer.clone(), credentials());

        let result = dispatcher
            .dispatch(&request(&["a@b.co", "c@d.io"]))
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.len(), 2);
        assert!(result.success);
        assert_eq!(result.message_id, sent[0].message_id);
    }

    #[tokio::test]
    async fn invalid_recipient_sends_nothing() {
        let mailer = Arc::new(RecordingMailer::default());
        let dispatcher = Dispatcher::new(mailer.clone(), credentials());

        let err = dispatcher.dispatch(&request(&["not-an-email"])).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid recipient(s): not-an-email");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn input_errors_win_over_config_errors() {
        let dispatcher = Dispatcher::new(Arc::new(RecordingMailer::default()), MailCredentials::default());

        let err = dispatcher.dispatch(&request(&[])).await.unwrap_err();
        assert!(err.is_bad_request());

        let err = dispatcher.dispatch(&request(&["a@b.co"])).await.unwrap_err();
        assert!(err.is_config());
        assert!(!dispatcher.is_configured());
    }

    #[tokio::test]
    async fn transport_failure_surfaces_description() {
        let mailer = Arc::new(RecordingMailer {
            fail_with: Some("535 Username and Password not accepted".to_string()),
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(mailer, credentials());

        let err = dispatcher.dispatch(&request(&["a@b.co"])).await.unwrap_err();

        assert!(matches!(err, NotifyError::Transport(_)));
        assert!(err.to_string().contains("535"));
    }
}
