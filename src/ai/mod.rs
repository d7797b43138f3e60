//! Chat-completion service integration
//!
//! Provides the `ChatService` trait used by the HTTP handlers, the Groq
//! client implementation, and a scriptable mock for tests.

pub mod client;
pub mod mock;

pub use client::GroqChatClient;
pub use mock::MockChatClient;

use crate::models::SamplingParams;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send one prompt as a single user message and return the model's text.
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String>;
}
