use super::ChatService;
use crate::models::SamplingParams;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A scripted reply the mock hands out in order.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Upstream { status: u16, message: String },
}

pub struct MockChatClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_text_response(self, response: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Text(response.into()));
        self
    }

    pub fn with_upstream_error(self, status: u16, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push(MockReply::Upstream {
            status,
            message: message.into(),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, prompt: &str, _params: &SamplingParams) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default mock response echoes a prompt preview
            let preview: String = prompt.chars().take(40).collect();
            return Ok(format!("Mock completion for: {}", preview));
        }

        let index = (*count - 1) % replies.len();
        match replies[index].clone() {
            MockReply::Text(text) => Ok(text),
            MockReply::Upstream { status, message } => Err(Error::Upstream { status, message }),
        }
    }
}
