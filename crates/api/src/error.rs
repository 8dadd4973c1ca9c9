use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use ingest::IngestError;
use notify::NotifyError;
use summarize::SummarizeError;

/// Every handler failure. Rendered as `{ "error": message }` with the
/// matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid server configuration
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    UpstreamEmpty(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    PayloadTooLarge(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamEmpty(_) => StatusCode::BAD_GATEWAY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Config(_)
            | ApiError::Upstream(_)
            | ApiError::Transport(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        let message = err.to_string();
        match err {
            SummarizeError::MissingInput => ApiError::BadRequest(message),
            SummarizeError::MissingApiKey => ApiError::Config(message),
            SummarizeError::UpstreamEmpty => ApiError::UpstreamEmpty(message),
            SummarizeError::Upstream(_) => ApiError::Upstream(message),
        }
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        let message = err.to_string();
        if err.is_bad_request() {
            ApiError::BadRequest(message)
        } else if err.is_config() {
            ApiError::Config(message)
        } else {
            ApiError::Transport(message)
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::MissingFile => ApiError::BadRequest(err.to_string()),
            IngestError::Decode(_) | IngestError::Read(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            IngestError::Read(err.body_text()).into()
        }
    }
}
