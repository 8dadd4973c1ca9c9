use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::SummarizeError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Anything that can turn a prompt into raw completion text
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the raw text of the completion. An empty string means the
    /// provider answered without any text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, SummarizeError>;

    fn provider_name(&self) -> &str;
}

/// Fixed sampling parameters for summarization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
            response_mime_type: "application/json".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    generation_config: GenerationConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            generation_config: GenerationConfig::default(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, SummarizeError> {
        let request = GenerateContentRequest {
            contents: vec![
                Content {
                    role: "user",
                    parts: vec![Part { text: system }],
                },
                Content {
                    role: "user",
                    parts: vec![Part { text: prompt }],
                },
            ],
            generation_config: &self.generation_config,
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling generateContent");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Upstream(format!("Failed to reach Gemini: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Upstream(format!(
                "Gemini request failed ({}): {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Upstream(format!("Failed to parse Gemini response: {}", e)))?;

        let text = parsed.text();
        info!(model = %self.model, chars = text.len(), "Gemini completion finished");

        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> GeminiClient {
        GeminiClient::new(server.url(), DEFAULT_MODEL.to_string(), "test-key".to_string())
    }

    #[tokio::test]
    async fn sends_fixed_generation_config_and_reads_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {
                    "temperature": 0.2,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 1024,
                    "responseMimeType": "application/json"
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [{"text": "{\"summary\":"}, {"text": "\"ok\"}"}]
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let text = client_for(&server).complete("system", "prompt").await.unwrap();

        assert_eq!(text, "{\"summary\":\"ok\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn no_candidates_yields_empty_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
            .create_async()
            .await;

        let text = client_for(&server).complete("system", "prompt").await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let err = client_for(&server).complete("system", "prompt").await.unwrap_err();

        match err {
            SummarizeError::Upstream(message) => {
                assert!(message.contains("429"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn endpoint_accepts_prefixed_model_names() {
        let client = GeminiClient::new(
            "http://localhost/v1beta/".to_string(),
            "models/gemini-pro".to_string(),
            "k".to_string(),
        );
        assert_eq!(
            client.endpoint(),
            "http://localhost/v1beta/models/gemini-pro:generateContent"
        );
    }
}
