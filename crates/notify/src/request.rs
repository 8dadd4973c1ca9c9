use serde::{Deserialize, Serialize};

use crate::{NotifyError, address};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EmailRequest {
    /// Checks recipients and subject. Runs before any configuration or network work.
    pub fn validate(&self) -> Result<(), NotifyError> {
        if self.to.is_empty() || self.subject.trim().is_empty() {
            return Err(NotifyError::MissingRecipientsOrSubject);
        }

        let invalid = address::invalid_addresses(&self.to);
        if !invalid.is_empty() {
            return Err(NotifyError::InvalidRecipients(
                invalid.into_iter().map(str::to_string).collect(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResult {
    pub success: bool,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

/// A validated message ready for the transport
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub message_id: String,
}

impl OutgoingEmail {
    pub fn from_request(request: &EmailRequest, from: &str) -> Self {
        let domain = address::domain_of(from).unwrap_or("localhost");

        Self {
            from: from.to_string(),
            to: request.to.clone(),
            subject: request.subject.clone(),
            text: non_empty(&request.text),
            html: non_empty(&request.html),
            message_id: format!("<{}@{}>", uuid::Uuid::new_v4(), domain),
        }
    }

    /// All recipients as one header value
    pub fn recipient_header(&self) -> String {
        self.to.join(", ")
    }
}

fn non_empty(body: &Option<String>) -> Option<String> {
    body.as_ref().filter(|b| !b.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(to: &[&str], subject: &str) -> EmailRequest {
        EmailRequest {
            to: to.iter().map(|s| s.to_string()).collect(),
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_recipients_or_blank_subject_rejected() {
        assert!(matches!(
            request(&[], "Meeting Summary").validate(),
            Err(NotifyError::MissingRecipientsOrSubject)
        ));
        assert!(matches!(
            request(&["a@b.co"], "   ").validate(),
            Err(NotifyError::MissingRecipientsOrSubject)
        ));
    }

    #[test]
    fn names_all_invalid_recipients() {
        let err = request(&["x@y.io", "not-an-email", "also bad@y.io"], "Hi")
            .validate()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid recipient(s): not-an-email, also bad@y.io"
        );
        assert!(err.is_bad_request());
    }

    #[test]
    fn deserializes_wire_shape() {
        let req: EmailRequest = serde_json::from_str(
            r#"{"to":["a@b.co"],"subject":"Meeting Summary","text":"hi"}"#,
        )
        .unwrap();

        assert_eq!(req.to, vec!["a@b.co".to_string()]);
        assert_eq!(req.text.as_deref(), Some("hi"));
        assert!(req.html.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn outgoing_drops_empty_bodies_and_joins_recipients() {
        let req = EmailRequest {
            to: vec!["a@b.co".to_string(), "c@d.io".to_string()],
            subject: "S".to_string(),
            text: Some(String::new()),
            html: Some("<p>hi</p>".to_string()),
        };

        let email = OutgoingEmail::from_request(&req, "Notes <notes@example.com>");

        assert!(email.text.is_none());
        assert_eq!(email.html.as_deref(), Some("<p>hi</p>"));
        assert_eq!(email.recipient_header(), "a@b.co, c@d.io");
        assert!(email.message_id.starts_with('<'));
        assert!(email.message_id.ends_with("@example.com>"));
    }

    #[test]
    fn result_uses_camel_case_message_id() {
        let value = serde_json::to_value(EmailResult {
            success: true,
            message_id: "<id@x>".to_string(),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "messageId": "<id@x>"}));
    }
}
