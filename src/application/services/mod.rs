mod batch_processor;
mod chat_graph;
mod claim_adjudicator;
mod claim_ingestion_service;
mod document_assembler;
pub mod prompts;
mod text_normalizer;
mod vector_store_adapter;

pub use batch_processor::{BatchError, ClaimBatchProcessor};
pub use chat_graph::{ChatAnswer, ChatGraph, ChatGraphError};
pub use claim_adjudicator::{ClaimAdjudicator, coerce_decision};
pub use claim_ingestion_service::{ClaimIngestionService, IngestionError, IngestionReport};
pub use document_assembler::{AssemblyError, assemble_documents};
pub use text_normalizer::{collapse_whitespace, normalize_invoice_text, reconstruct_name};
pub use vector_store_adapter::{VectorStoreAdapter, VectorStoreAdapterError};
