use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use notify::{EmailRequest, EmailResult};
use summarize::{SummarizationRequest, SummarizationResult};

use crate::ClientError;

/// The three server endpoints as seen from the client
#[async_trait]
pub trait Backend: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError>;

    async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResult, ClientError>;

    async fn send_email(&self, request: &EmailRequest) -> Result<EmailResult, ClientError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        debug!(status = status.as_u16(), ?message, "Server returned an error");

        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/plain")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;

        let body: UploadResponse = Self::read_json(response).await?;
        Ok(body.text)
    }

    async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResult, ClientError> {
        let response = self
            .client
            .post(self.url("/api/summarize"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn send_email(&self, request: &EmailRequest) -> Result<EmailResult, ClientError> {
        let response = self
            .client
            .post(self.url("/api/email"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn summarize_posts_json_and_reads_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/summarize")
            .match_body(Matcher::Json(json!({"text": "t", "instruction": "i"})))
            .with_status(200)
            .with_body(r#"{"summary":"ok","action_items":["a"],"decisions":[],"follow_ups":[],"risks":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let result = client
            .summarize(&SummarizationRequest::new("t", "i"))
            .await
            .unwrap();

        assert_eq!(result.summary, "ok");
        assert_eq!(result.action_items, vec!["a".to_string()]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_body_becomes_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/email")
            .with_status(400)
            .with_body(r#"{"error":"Invalid recipient(s): not-an-email"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(format!("{}/", server.url()));
        let err = client
            .send_email(&EmailRequest {
                to: vec!["not-an-email".to_string()],
                subject: "S".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Invalid recipient(s): not-an-email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn upload_sends_multipart_file_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
            .match_body(Matcher::Regex("name=\"file\"".to_string()))
            .with_status(200)
            .with_body(r#"{"text":"Alice: hi"}"#)
            .create_async()
            .await;

        let text = ApiClient::new(server.url())
            .upload("standup.txt", b"Alice: hi".to_vec())
            .await
            .unwrap();

        assert_eq!(text, "Alice: hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_error_keeps_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/upload")
            .with_status(413)
            .with_body("length limit exceeded")
            .create_async()
            .await;

        let err = ApiClient::new(server.url())
            .upload("big.txt", vec![b'a'; 10])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "request failed (413)");
    }
}
