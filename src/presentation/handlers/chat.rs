use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileLoader, LlmClient, VectorStore};
use crate::application::services::ChatGraphError;
use crate::domain::MetadataFilter;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub metadata_filter: Option<MetadataFilter>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ChatResponse {
    fn success(response: String) -> Self {
        Self {
            response,
            status: "success".to_string(),
            details: None,
        }
    }

    fn error(response: &str, details: Option<String>) -> Self {
        Self {
            response: response.to_string(),
            status: "error".to_string(),
            details,
        }
    }
}

#[tracing::instrument(skip(state, request), fields(filtered = request.metadata_filter.is_some()))]
pub async fn chat_handler<F, L, V>(
    State(state): State<AppState<F, L, V>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
{
    tracing::debug!(query = %sanitize_prompt(&request.query), "Processing chat query");

    if request.query.trim().is_empty() {
        tracing::warn!("Chat request with empty query");
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::error(
                "Query must not be empty",
                None,
            )),
        );
    }

    let result = state
        .chat_graph
        .run(&request.query, request.metadata_filter.as_ref())
        .await;

    let body = match result {
        Ok(answer) => {
            tracing::info!(sources = answer.sources.len(), "Chat answered");
            ChatResponse::success(answer.answer)
        }
        Err(ChatGraphError::NoResponse) => {
            tracing::warn!("Chat graph produced no answer");
            ChatResponse::error(
                "No response generated by the chatbot",
                Some(ChatGraphError::NoResponse.to_string()),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat graph failed");
            ChatResponse::error("Chatbot failed to process your query", Some(e.to_string()))
        }
    };

    (StatusCode::OK, Json(body))
}
