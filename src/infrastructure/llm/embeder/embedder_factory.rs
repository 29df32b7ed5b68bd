use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::infrastructure::llm::{LocalCandleEmbedder, MockEmbedder, OpenAiEmbedder};
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: the openai embedding provider needs embeddings.api_key")]
    MissingApiKey,
    #[error("model initialization failed: {0}")]
    InitializationFailed(String),
}

impl EmbedderFactory {
    pub fn create(settings: &EmbeddingsSettings) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::Local => {
                let embedder = LocalCandleEmbedder::new(&settings.model)
                    .map_err(|e| EmbedderFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(embedder))
            }
            EmbeddingProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(EmbedderFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, base_url = %settings.base_url, "Using remote embeddings");
                Ok(Arc::new(OpenAiEmbedder::new(
                    settings.base_url.clone(),
                    key,
                    settings.model.clone(),
                )))
            }
            EmbeddingProvider::Mock => {
                tracing::warn!("Using mock embeddings; similarity search will not be meaningful");
                Ok(Arc::new(MockEmbedder))
            }
        }
    }
}
