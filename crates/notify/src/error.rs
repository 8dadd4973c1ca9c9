use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Missing recipients or subject")]
    MissingRecipientsOrSubject,

    #[error("Invalid recipient(s): {}", .0.join(", "))]
    InvalidRecipients(Vec<String>),

    #[error("Missing Gmail environment variables")]
    MissingCredentials,

    #[error("App password must be 16 characters (no spaces)")]
    InvalidAppPassword,

    #[error("{0}")]
    Transport(String),
}

impl NotifyError {
    /// True for failures caused by the caller's input
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::MissingRecipientsOrSubject | Self::InvalidRecipients(_)
        )
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::InvalidAppPassword)
    }
}
