//! Data models and structures
//!
//! Defines the request/response payloads for both endpoints, the Groq API
//! wire types, and application configuration.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-book`.
///
/// `bookTitle` is optional at the serde level so the handler can answer with
/// the exact validation message instead of a generic decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBookRequest {
    pub book_title: Option<String>,
}

/// Body of `POST /api/generate-plan`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub book_title: Option<String>,
    pub user_context: Option<String>,
}

/// Structured book analysis returned by the analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookInfo {
    pub description: String,
    pub popular_queries: Vec<String>,
    pub examples: Vec<PersonExample>,
}

/// A real person who applied the book's principles, with a short quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonExample {
    pub name: String,
    pub quote: String,
}

impl BookInfo {
    /// Hardcoded analysis substituted when the model output fails to parse.
    pub fn fallback() -> Self {
        Self {
            description: "Эта книга про личностное развитие и изменение жизни".to_string(),
            popular_queries: vec![
                "Хочу изменить свою жизнь".to_string(),
                "Стать более продуктивным".to_string(),
                "Достичь своих целей".to_string(),
                "Найти мотивацию".to_string(),
            ],
            examples: vec![
                PersonExample {
                    name: "Автор книги".to_string(),
                    quote: "Применял эти принципы многие годы".to_string(),
                },
                PersonExample {
                    name: "Известный предприниматель".to_string(),
                    quote: "Эта книга изменила мой подход к работе".to_string(),
                },
            ],
        }
    }
}

/// Success body of the plan endpoint: the model's text, untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: String,
}

/// Per-request sampling configuration for the chat completion call.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
}

// Groq API request/response models (OpenAI-compatible schema)

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// Error envelope returned by the Groq API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamErrorDetail {
    pub message: Option<String>,
}

// Configuration

#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key. Absent key keeps the server running; affected requests
    /// get a configuration error instead.
    pub groq_api_key: Option<String>,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| crate::Error::Internal(format!("Invalid PORT value '{}'", raw)))?,
            Err(_) => 8080,
        };

        Ok(Self {
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            port,
        })
    }
}
