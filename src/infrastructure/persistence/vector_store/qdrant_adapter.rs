use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType,
    Filter, PointId, PointStruct, ScoredPoint, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder, VectorsConfig,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, PayloadFieldType, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{ClaimDocument, ClaimMetadata, DocumentId, Embedding, MetadataFilter};

pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_name: String,
}

impl QdrantAdapter {
    pub fn new(url: &str, collection_name: String) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_name,
        })
    }

    fn map_distance_metric(metric: &DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    fn map_field_type(field_type: &PayloadFieldType) -> FieldType {
        match field_type {
            PayloadFieldType::Keyword => FieldType::Keyword,
            PayloadFieldType::Text => FieldType::Text,
        }
    }

    fn payload(document: &ClaimDocument) -> HashMap<String, serde_json::Value> {
        let metadata = &document.metadata;
        [
            ("content", &document.content),
            ("invoice_id", &metadata.invoice_id),
            ("status", &metadata.status),
            ("reason", &metadata.reason),
            ("employee_name", &metadata.employee_name),
            ("date", &metadata.date),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::String(value.clone())))
        .collect()
    }

    fn filter(filter: &MetadataFilter) -> Filter {
        Filter::must(
            filter
                .conditions()
                .map(|(field, value)| Condition::matches(field, value.to_string())),
        )
    }

    fn to_document(point: ScoredPoint) -> Option<SearchResult> {
        let id = match point.id?.point_id_options? {
            PointIdOptions::Uuid(uuid) => Uuid::parse_str(&uuid).ok()?,
            PointIdOptions::Num(_) => return None,
        };

        let payload = point.payload;
        let text = |key: &str| {
            payload
                .get(key)
                .and_then(|v| v.as_str())
                .cloned()
                .unwrap_or_default()
        };

        Some(SearchResult {
            document: ClaimDocument {
                id: DocumentId::from_uuid(id),
                content: payload.get("content")?.as_str()?.clone(),
                metadata: ClaimMetadata {
                    invoice_id: text("invoice_id"),
                    status: text("status"),
                    reason: text("reason"),
                    employee_name: text("employee_name"),
                    date: text("date"),
                },
            },
            score: point.score,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %self.collection_name))]
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        if self.collection_exists().await? {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Self::map_distance_metric(&config.distance_metric),
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, dimensions = config.vector_dimensions, "collection_created");

        for index in &config.payload_indexes {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.collection_name,
                    &index.field_name,
                    Self::map_field_type(&index.field_type),
                ))
                .await
                .map_err(|e| VectorStoreError::PayloadIndexFailed(e.to_string()))?;
        }

        Ok(true)
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn get_collection_vector_size(&self) -> Result<Option<u64>, VectorStoreError> {
        if !self.collection_exists().await? {
            return Ok(None);
        }

        let collection_info = self
            .client
            .collection_info(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(collection_info
            .result
            .and_then(|result| result.config)
            .and_then(|config| config.params)
            .and_then(|params| params.vectors_config)
            .and_then(|vectors_config| match vectors_config.config {
                Some(qdrant_client::qdrant::vectors_config::Config::Params(params)) => {
                    Some(params.size)
                }
                _ => None,
            }))
    }

    #[instrument(skip(self, documents, embeddings), fields(collection = %self.collection_name, count = documents.len()))]
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

        let points: Vec<PointStruct> = documents
            .iter()
            .zip(embeddings)
            .map(|(document, embedding)| {
                PointStruct::new(
                    PointId::from(document.id.as_uuid().to_string()),
                    embedding.values.clone(),
                    Self::payload(document),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points).wait(true))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %self.collection_name, count = documents.len(), "points_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding, filter), fields(collection = %self.collection_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let mut request =
            SearchPointsBuilder::new(&self.collection_name, embedding.values.clone(), top_k as u64)
                .with_payload(true);

        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            request = request.filter(Self::filter(filter));
        }

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(Self::to_document)
            .collect())
    }
}
