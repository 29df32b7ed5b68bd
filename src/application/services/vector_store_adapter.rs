use std::sync::Arc;

use crate::application::ports::{
    CollectionConfig, Embedder, EmbedderError, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{ClaimDocument, MetadataFilter};

/// Embeds claim documents and queries, and forwards them to the store.
pub struct VectorStoreAdapter<V>
where
    V: VectorStore,
{
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<V>,
}

impl<V> VectorStoreAdapter<V>
where
    V: VectorStore,
{
    pub fn new(embedder: Arc<dyn Embedder>, vector_store: Arc<V>) -> Self {
        Self {
            embedder,
            vector_store,
        }
    }

    /// Creates the claims collection unless it already exists.
    pub async fn ensure_collection(
        &self,
        vector_dimensions: u64,
    ) -> Result<bool, VectorStoreAdapterError> {
        if let Some(existing) = self.vector_store.get_collection_vector_size().await? {
            if existing != vector_dimensions {
                return Err(VectorStoreAdapterError::DimensionMismatch {
                    expected: vector_dimensions,
                    actual: existing,
                });
            }
            return Ok(false);
        }

        let created = self
            .vector_store
            .create_collection(&CollectionConfig::claims(vector_dimensions))
            .await?;
        Ok(created)
    }

    #[tracing::instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn add_documents(
        &self,
        documents: &[ClaimDocument],
    ) -> Result<usize, VectorStoreAdapterError> {
        if documents.is_empty() {
            tracing::debug!("No documents to index");
            return Ok(0);
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.vector_store.upsert(documents, &embeddings).await?;

        tracing::info!(count = documents.len(), "Claim documents indexed");
        Ok(documents.len())
    }

    #[tracing::instrument(skip(self, query), fields(k = k, filtered = filter.is_some()))]
    pub async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, VectorStoreAdapterError> {
        let filter = filter.filter(|f| !f.is_empty());
        let query_embedding = self.embedder.embed(query).await?;

        let results = self.vector_store.search(&query_embedding, k, filter).await?;

        tracing::debug!(hits = results.len(), "Similarity search complete");
        Ok(results)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreAdapterError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("store: {0}")]
    Store(#[from] VectorStoreError),
    #[error("collection holds {actual}-dimension vectors, embedder produces {expected}")]
    DimensionMismatch { expected: u64, actual: u64 },
}
