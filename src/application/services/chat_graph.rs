use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{LlmClient, LlmClientError, SearchResult, ToolSpec, VectorStore};
use crate::domain::{ChatMessage, ClaimDocument, MessageRole, MetadataFilter, ToolCall};

use super::prompts::{CHAT_SYSTEM_PROMPT, RETRIEVE_TOOL_DESCRIPTION, RETRIEVE_TOOL_NAME};
use super::vector_store_adapter::{VectorStoreAdapter, VectorStoreAdapterError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    QueryOrRespond,
    Tools,
    Generate,
    End,
}

#[derive(Debug, Clone)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<ClaimDocument>,
}

#[derive(Deserialize)]
struct RetrieveArguments {
    query: String,
}

/// Retrieval-augmented chat over the indexed claims.
///
/// The model first decides whether to call the `retrieve` tool. When it
/// does, the tool results are fed into a final answer step; otherwise its
/// direct reply is the answer.
pub struct ChatGraph<L, V>
where
    L: LlmClient,
    V: VectorStore,
{
    llm_client: Arc<L>,
    index: Arc<VectorStoreAdapter<V>>,
    top_k: usize,
}

impl<L, V> ChatGraph<L, V>
where
    L: LlmClient,
    V: VectorStore,
{
    pub fn new(llm_client: Arc<L>, index: Arc<VectorStoreAdapter<V>>, top_k: usize) -> Self {
        Self {
            llm_client,
            index,
            top_k,
        }
    }

    #[tracing::instrument(skip(self, query, filter))]
    pub async fn run(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
    ) -> Result<ChatAnswer, ChatGraphError> {
        let tools = [retrieve_tool()];
        let mut messages = vec![ChatMessage::user(query)];
        let mut sources = Vec::new();
        let mut node = Node::QueryOrRespond;

        while node != Node::End {
            tracing::debug!(?node, messages = messages.len(), "Entering chat node");

            node = match node {
                Node::QueryOrRespond => {
                    let turn = self.llm_client.chat(&messages, &tools).await?;
                    let next = if turn.message.requests_tools() {
                        Node::Tools
                    } else {
                        Node::End
                    };
                    messages.push(turn.message);
                    next
                }
                Node::Tools => {
                    let calls = messages
                        .last()
                        .map(|m| m.tool_calls.clone())
                        .unwrap_or_default();

                    for call in calls {
                        let content = self.run_tool(&call, query, filter, &mut sources).await?;
                        messages.push(ChatMessage::tool(call.id, content));
                    }
                    Node::Generate
                }
                Node::Generate => {
                    let prompt = generation_messages(&messages);
                    let turn = self.llm_client.chat(&prompt, &[]).await?;
                    messages.push(turn.message);
                    Node::End
                }
                Node::End => Node::End,
            };
        }

        let answer = messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant && !m.requests_tools())
            .map(|m| m.content.clone())
            .ok_or(ChatGraphError::NoResponse)?;

        Ok(ChatAnswer { answer, sources })
    }

    async fn run_tool(
        &self,
        call: &ToolCall,
        original_query: &str,
        filter: Option<&MetadataFilter>,
        sources: &mut Vec<ClaimDocument>,
    ) -> Result<String, ChatGraphError> {
        if call.name != RETRIEVE_TOOL_NAME {
            tracing::warn!(tool = %call.name, "Model requested an unknown tool");
            return Ok(format!("Error: {} is not a valid tool.", call.name));
        }

        let query = serde_json::from_str::<RetrieveArguments>(&call.arguments)
            .map(|args| args.query)
            .unwrap_or_else(|_| original_query.to_string());

        let results = self
            .index
            .similarity_search(&query, self.top_k, filter)
            .await?;

        let serialized = serialize_results(&results);
        sources.extend(results.into_iter().map(|r| r.document));
        Ok(serialized)
    }
}

fn retrieve_tool() -> ToolSpec {
    ToolSpec {
        name: RETRIEVE_TOOL_NAME.to_string(),
        description: RETRIEVE_TOOL_DESCRIPTION.to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search text describing the claims to look up"
                }
            },
            "required": ["query"]
        }),
    }
}

fn serialize_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "Source: {}\nContent: {}",
                serde_json::to_string(&r.document.metadata).unwrap_or_default(),
                r.document.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// System prompt carrying the latest tool output, followed by the
/// conversation without tool traffic.
fn generation_messages(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut tool_outputs: Vec<&str> = messages
        .iter()
        .rev()
        .take_while(|m| m.role == MessageRole::Tool)
        .map(|m| m.content.as_str())
        .collect();
    tool_outputs.reverse();

    let system = ChatMessage::system(format!(
        "{}\n\n{}",
        CHAT_SYSTEM_PROMPT,
        tool_outputs.join("\n\n")
    ));

    std::iter::once(system)
        .chain(
            messages
                .iter()
                .filter(|m| match m.role {
                    MessageRole::System | MessageRole::User => true,
                    MessageRole::Assistant => m.tool_calls.is_empty(),
                    MessageRole::Tool => false,
                })
                .cloned(),
        )
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ChatGraphError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("retrieval: {0}")]
    Retrieval(#[from] VectorStoreAdapterError),
    #[error("no response generated by the chatbot")]
    NoResponse,
}
