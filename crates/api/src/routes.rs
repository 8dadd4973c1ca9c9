use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Serialize;
use tracing::info;

use ingest::{IngestError, TranscriptReader};
use notify::{Dispatcher, EmailRequest, EmailResult};
use summarize::{SummarizationRequest, SummarizationResult, SummarizeError, Summarizer};

use crate::config::AppConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            summarizer: config.summarizer(),
            dispatcher: Dispatcher::smtp(config.mail_credentials()),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    summarizer_configured: bool,
    mailer_configured: bool,
}

#[derive(Serialize)]
struct UploadResponse {
    text: String,
}

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/upload", post(upload_transcript))
        .route("/api/summarize", post(summarize_transcript))
        .route("/api/email", post(send_email))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        summarizer_configured: state.summarizer.is_configured(),
        mailer_configured: state.dispatcher.is_configured(),
    })
}

async fn upload_transcript(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        let transcript = TranscriptReader::decode(&bytes, file_name.as_deref())?;

        info!(
            fingerprint = %transcript.fingerprint,
            chars = transcript.char_count(),
            "Transcript uploaded"
        );

        return Ok(Json(UploadResponse {
            text: transcript.text,
        }));
    }

    Err(IngestError::MissingFile.into())
}

async fn summarize_transcript(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummarizationRequest>, JsonRejection>,
) -> Result<Json<SummarizationResult>, ApiError> {
    // Configuration is checked before the body is looked at.
    if !state.summarizer.is_configured() {
        return Err(SummarizeError::MissingApiKey.into());
    }

    let Json(request) = payload?;
    let result = state.summarizer.summarize(&request).await?;

    Ok(Json(result))
}

async fn send_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<EmailResult>, ApiError> {
    let Json(request) = payload?;
    let result = state.dispatcher.dispatch(&request).await?;

    info!(message_id = %result.message_id, "Email sent");

    Ok(Json(result))
}
