mod archive_extractor;
mod collection_config;
mod distance_metric;
mod embedder;
mod file_loader;
mod llm_client;
mod payload_field_type;
mod payload_index;
mod search_result;
mod vector_store;
mod vector_store_error;

pub use archive_extractor::{ArchiveError, ArchiveExtractor};
pub use collection_config::CollectionConfig;
pub use distance_metric::DistanceMetric;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{ChatTurn, LlmClient, LlmClientError, ToolSpec};
pub use payload_field_type::PayloadFieldType;
pub use payload_index::PayloadIndex;
pub use search_result::SearchResult;
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
