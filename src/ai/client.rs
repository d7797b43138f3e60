use super::ChatService;
use crate::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SamplingParams, UpstreamErrorBody,
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Literal surfaced when the upstream error body carries no message.
const GENERIC_UPSTREAM_ERROR: &str = "Ошибка при обращении к Groq API";

pub struct GroqChatClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests to target a mock
    /// server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Groq: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq API error (status {}): {}", status, error_text);

            let message = serde_json::from_str::<UpstreamErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_string());

            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Groq response: {}\nBody: {}", e, body);
            Error::Internal(format!("Failed to parse Groq response: {}", e))
        })
    }
}

#[async_trait]
impl ChatService for GroqChatClient {
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending chat completion request to Groq"
        );

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
        };

        let response = self.chat_completion(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::Internal("No content in Groq response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params() -> SamplingParams {
        SamplingParams {
            temperature: 0.7,
            max_tokens: 1000,
            top_p: None,
        }
    }

    #[tokio::test]
    async fn test_complete_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "Эта книга про привычки" },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = GroqChatClient::new(
            "test-key".to_string(),
            "llama-3.3-70b-versatile".to_string(),
        )
        .with_base_url(server.uri());

        let text = client.complete("prompt", &params()).await.unwrap();
        assert_eq!(text, "Эта книга про привычки");
    }

    #[tokio::test]
    async fn test_complete_sends_configured_model_and_params() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(body_string_contains("\"model\":\"custom-model\""))
            .and(body_string_contains("\"max_tokens\":2000"))
            .and(body_string_contains("\"top_p\":0.9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "план" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GroqChatClient::new("key".to_string(), "custom-model".to_string())
            .with_base_url(server.uri());

        let params = SamplingParams {
            temperature: 0.7,
            max_tokens: 2000,
            top_p: Some(0.9),
        };
        client.complete("prompt", &params).await.unwrap();
    }

    #[tokio::test]
    async fn test_upstream_error_surfaces_status_and_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "message": "Rate limit reached", "type": "tokens" }
            })))
            .mount(&server)
            .await;

        let client = GroqChatClient::new("key".to_string(), "llama-3.3-70b-versatile".to_string())
            .with_base_url(server.uri());

        let err = client.complete("prompt", &params()).await.unwrap_err();
        match err {
            Error::Upstream { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_without_message_uses_generic_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GroqChatClient::new("key".to_string(), "llama-3.3-70b-versatile".to_string())
            .with_base_url(server.uri());

        let err = client.complete("prompt", &params()).await.unwrap_err();
        match err {
            Error::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Ошибка при обращении к Groq API");
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_internal_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = GroqChatClient::new("key".to_string(), "llama-3.3-70b-versatile".to_string())
            .with_base_url(server.uri());

        let err = client.complete("prompt", &params()).await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
