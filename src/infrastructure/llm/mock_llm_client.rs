use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::application::ports::{ChatTurn, LlmClient, LlmClientError, ToolSpec};
use crate::domain::ChatMessage;

/// Default adjudication reply once scripted replies run out.
pub const MOCK_DECISION_JSON: &str = r#"{
    "customer_name": "Mock Customer",
    "reimbursement_status": "accept",
    "reason": "Within policy limits",
    "date": "2024-03-01",
    "invoice_ID": "INV-0001",
    "invoice_text": "mock invoice"
}"#;

enum ScriptedReply {
    Text(String),
    Failure(String),
}

/// Scripted LLM for tests. Replies are served in order; every prompt and
/// chat transcript is recorded for inspection.
#[derive(Default)]
pub struct MockLlmClient {
    json_replies: Mutex<VecDeque<ScriptedReply>>,
    chat_replies: Mutex<VecDeque<ChatMessage>>,
    prompts: Mutex<Vec<String>>,
    transcripts: Mutex<Vec<Vec<ChatMessage>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_reply(self, reply: impl Into<String>) -> Self {
        lock(&self.json_replies).push_back(ScriptedReply::Text(reply.into()));
        self
    }

    pub fn with_json_failure(self, cause: impl Into<String>) -> Self {
        lock(&self.json_replies).push_back(ScriptedReply::Failure(cause.into()));
        self
    }

    pub fn with_chat_reply(self, reply: ChatMessage) -> Self {
        lock(&self.chat_replies).push_back(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    pub fn transcripts(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.transcripts).clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_json(&self, prompt: &str) -> Result<String, LlmClientError> {
        lock(&self.prompts).push(prompt.to_string());

        match lock(&self.json_replies).pop_front() {
            Some(ScriptedReply::Text(reply)) => Ok(reply),
            Some(ScriptedReply::Failure(cause)) => Err(LlmClientError::ApiRequestFailed(cause)),
            None => Ok(MOCK_DECISION_JSON.to_string()),
        }
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolSpec],
    ) -> Result<ChatTurn, LlmClientError> {
        lock(&self.transcripts).push(messages.to_vec());

        let message = lock(&self.chat_replies)
            .pop_front()
            .unwrap_or_else(|| ChatMessage::assistant("Mock answer"));

        Ok(ChatTurn { message })
    }
}
