pub mod error;
pub mod llm;
pub mod parser;
pub mod prompt;
pub mod schema;

pub use error::SummarizeError;
pub use llm::{CompletionProvider, GeminiClient, GenerationConfig};
pub use parser::coerce_response;
pub use schema::{SummarizationRequest, SummarizationResult};

use std::sync::Arc;
use tracing::info;

/// Summarization gateway.
///
/// Holds no provider when the API key is not configured; every call then
/// fails with [`SummarizeError::MissingApiKey`].
#[derive(Clone)]
pub struct Summarizer {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Build a Gemini-backed summarizer if a non-empty key is present
    pub fn from_api_key(api_key: Option<&str>, base_url: &str, model: &str) -> Self {
        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Self::new(Arc::new(GeminiClient::new(
                base_url.to_string(),
                model.to_string(),
                key.to_string(),
            ))),
            None => Self::unconfigured(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResult, SummarizeError> {
        let provider = self.provider.as_ref().ok_or(SummarizeError::MissingApiKey)?;
        request.validate()?;

        let prompt = prompt::build_summary_prompt(&request.instruction, &request.text);
        let raw = provider.complete(prompt::SYSTEM_INSTRUCTION, &prompt).await?;

        if raw.is_empty() {
            return Err(SummarizeError::UpstreamEmpty);
        }

        let result = coerce_response(&raw);
        info!(
            provider = provider.provider_name(),
            action_items = result.action_items.len(),
            decisions = result.decisions.len(),
            follow_ups = result.follow_ups.len(),
            risks = result.risks.len(),
            "Summary generated"
        );

        Ok(result)
    }
}
