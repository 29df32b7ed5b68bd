use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{
    CollectionConfig, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{ClaimDocument, Embedding, MetadataFilter};

#[derive(Default)]
struct Collection {
    dimensions: Option<u64>,
    points: Vec<(ClaimDocument, Embedding)>,
}

/// Process-local store used for tests and for running without Qdrant.
/// Ranks by cosine similarity and applies metadata filters exactly.
#[derive(Default)]
pub struct InMemoryVectorStore {
    collection: RwLock<Collection>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.points.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn documents(&self) -> Vec<ClaimDocument> {
        self.collection
            .read()
            .await
            .points
            .iter()
            .map(|(document, _)| document.clone())
            .collect()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        let mut collection = self.collection.write().await;
        if collection.dimensions.is_some() {
            return Ok(false);
        }
        collection.dimensions = Some(config.vector_dimensions);
        Ok(true)
    }

    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        Ok(self.collection.read().await.dimensions.is_some())
    }

    async fn get_collection_vector_size(&self) -> Result<Option<u64>, VectorStoreError> {
        Ok(self.collection.read().await.dimensions)
    }

    async fn upsert(
        &self,
        documents: &[ClaimDocument],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if documents.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(format!(
                "{} documents but {} embeddings",
                documents.len(),
                embeddings.len()
            )));
        }
        if documents.is_empty() {
            return Ok(());
        }

        let mut collection = self.collection.write().await;
        let dimensions = *collection
            .dimensions
            .get_or_insert(embeddings.first().map_or(0, |e| e.dimensions() as u64));

        if let Some(bad) = embeddings.iter().find(|e| e.dimensions() as u64 != dimensions) {
            return Err(VectorStoreError::UpsertFailed(format!(
                "expected {}-dimension vectors, got {}",
                dimensions,
                bad.dimensions()
            )));
        }

        for (document, embedding) in documents.iter().zip(embeddings) {
            collection.points.retain(|(existing, _)| existing.id != document.id);
            collection.points.push((document.clone(), embedding.clone()));
        }
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let collection = self.collection.read().await;

        let mut results: Vec<SearchResult> = collection
            .points
            .iter()
            .filter(|(document, _)| filter.is_none_or(|f| f.matches(&document.metadata)))
            .map(|(document, stored)| SearchResult {
                document: document.clone(),
                score: embedding.cosine_similarity(stored),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        Ok(results)
    }
}
