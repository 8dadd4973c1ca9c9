use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response. `message` is the server's `error` field when present.
    #[error("{}", server_message(.status, .message))]
    Server { status: u16, message: Option<String> },

    #[error("{0}")]
    Network(String),
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("request failed ({})", status),
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}
