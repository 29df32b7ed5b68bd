use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ChatMessage;

/// A function the model may call during a chat turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: Value,
}

/// Assistant reply for one chat turn; `message.tool_calls` is empty when the
/// model answered directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub message: ChatMessage,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single-prompt completion constrained to a JSON object reply.
    async fn complete_json(&self, prompt: &str) -> Result<String, LlmClientError>;

    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatTurn, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
