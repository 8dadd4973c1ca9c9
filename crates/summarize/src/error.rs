use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Missing text or instruction")]
    MissingInput,

    #[error("GEMINI_API_KEY missing")]
    MissingApiKey,

    #[error("Empty model response")]
    UpstreamEmpty,

    #[error("{0}")]
    Upstream(String),
}
