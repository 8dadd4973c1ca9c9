use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use clap::{Parser, ValueEnum};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use notify::MailCredentials;
use notify::settings::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use summarize::Summarizer;
use summarize::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration, read once at startup from flags or the environment.
///
/// Provider and mail credentials are optional here; the endpoint that needs
/// them reports a configuration error when they are missing.
#[derive(Clone, Parser)]
#[command(name = "api", version, about = "Meeting notes summarizer API")]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: SocketAddr,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Gmail account used to authenticate with SMTP
    #[arg(long, env = "GMAIL_USER")]
    pub gmail_user: Option<String>,

    /// 16 character Gmail app password
    #[arg(long, env = "GMAIL_APP_PASSWORD", hide_env_values = true)]
    pub gmail_app_password: Option<String>,

    /// From header, e.g. "Meeting Notes <notes@gmail.com>"
    #[arg(long, env = "GMAIL_FROM")]
    pub gmail_from: Option<String>,

    #[arg(long, env = "SMTP_HOST", default_value = DEFAULT_SMTP_HOST)]
    pub smtp_host: String,

    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Comma separated CORS origins. Empty allows any origin.
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load `.env` if present, then parse flags and environment
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn summarizer(&self) -> Summarizer {
        Summarizer::from_api_key(
            self.gemini_api_key.as_deref(),
            &self.gemini_base_url,
            &self.gemini_model,
        )
    }

    pub fn mail_credentials(&self) -> MailCredentials {
        MailCredentials::new(
            self.gmail_user.clone(),
            self.gmail_app_password.clone(),
            self.gmail_from.clone(),
        )
        .with_server(self.smtp_host.clone(), self.smtp_port)
    }

    pub fn cors_layer(&self) -> Result<CorsLayer> {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| o.parse::<HeaderValue>().with_context(|| format!("Invalid CORS origin: {}", o)))
            .collect::<Result<_>>()?;

        let allow_origin = if origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(origins)
        };

        Ok(CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gmail_user", &self.gmail_user)
            .field("gmail_app_password", &self.gmail_app_password.as_ref().map(|_| "<redacted>"))
            .field("gmail_from", &self.gmail_from)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("allowed_origins", &self.allowed_origins)
            .field("log_format", &self.log_format)
            .finish()
    }
}
