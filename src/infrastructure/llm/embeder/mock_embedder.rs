use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const MOCK_EMBEDDING_DIMENSION: usize = 384;

/// Deterministic embedder for tests: every text maps to the same vector.
pub struct MockEmbedder;

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts
            .iter()
            .map(|_| Embedding::new(vec![0.1; MOCK_EMBEDDING_DIMENSION]))
            .collect())
    }
}
