use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, VectorStore};
use crate::application::services::{ChatGraph, ClaimIngestionService};
use crate::presentation::config::Settings;

/// Shared services handed to every handler.
pub struct AppState<F, L, V>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
{
    pub ingestion_service: Arc<ClaimIngestionService<F, L, V>>,
    pub chat_graph: Arc<ChatGraph<L, V>>,
    pub settings: Settings,
}

impl<F, L, V> Clone for AppState<F, L, V>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
{
    fn clone(&self) -> Self {
        Self {
            ingestion_service: Arc::clone(&self.ingestion_service),
            chat_graph: Arc::clone(&self.chat_graph),
            settings: self.settings.clone(),
        }
    }
}
