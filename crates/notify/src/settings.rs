use std::fmt;

use crate::NotifyError;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
const APP_PASSWORD_LEN: usize = 16;

/// Mail credentials exactly as configured; any of them may be missing
#[derive(Clone, Default)]
pub struct MailCredentials {
    pub user: Option<String>,
    pub app_password: Option<String>,
    pub from: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

/// Credentials that passed validation
#[derive(Clone)]
pub struct MailSettings {
    pub user: String,
    pub app_password: String,
    pub from: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl MailCredentials {
    pub fn new(user: Option<String>, app_password: Option<String>, from: Option<String>) -> Self {
        Self {
            user,
            app_password,
            from,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        }
    }

    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.smtp_host = host.into();
        self.smtp_port = port;
        self
    }


    pub fn validate(&self) -> Result<MailSettings, NotifyError> {
        let (Some(user), Some(password), Some(from)) = (
            present(&self.user),
            present(&self.app_password),
            present(&self.from),
        ) else {
            return Err(NotifyError::MissingCredentials);
        };

        // Google displays app passwords in groups of four separated by spaces.
        let app_password: String = password.chars().filter(|c| !c.is_whitespace()).collect();
        if app_password.chars().count() != APP_PASSWORD_LEN {
            return Err(NotifyError::InvalidAppPassword);
        }

        Ok(MailSettings {
            user: user.to_string(),
            app_password,
            from: from.to_string(),
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("user", &self.user)
            .field("app_password", &self.app_password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("user", &self.user)
            .field("app_password", &"<redacted>")
            .field("from", &self.from)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}
