use async_trait::async_trait;

use super::{CollectionConfig, SearchResult, VectorStoreError};
use crate::domain::{ClaimDocument, Embedding, MetadataFilter};

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError>;

    async fn collection_exists(&self) -> Result<bool, VectorStoreError>;

    async fn get_collection_vector_size(&self) -> Result<Option<u64>, VectorStoreError>;

    async fn upsert(
        &self,
        documents: &[ClaimDocument],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;
}
