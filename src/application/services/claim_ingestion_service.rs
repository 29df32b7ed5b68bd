use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, VectorStore};
use crate::domain::{BatchStatus, SkippedFile};

use super::batch_processor::{BatchError, ClaimBatchProcessor};
use super::document_assembler::{AssemblyError, assemble_documents};
use super::vector_store_adapter::{VectorStoreAdapter, VectorStoreAdapterError};

/// Per-upload summary handed back to the caller.
#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub status: BatchStatus,
    pub documents_stored: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub failed_adjudications: usize,
}

/// Adjudicates an invoice archive and indexes the results.
pub struct ClaimIngestionService<F, L, V>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
{
    batch_processor: ClaimBatchProcessor<F, L>,
    index: Arc<VectorStoreAdapter<V>>,
}

impl<F, L, V> ClaimIngestionService<F, L, V>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
{
    pub fn new(batch_processor: ClaimBatchProcessor<F, L>, index: Arc<VectorStoreAdapter<V>>) -> Self {
        Self {
            batch_processor,
            index,
        }
    }

    #[tracing::instrument(skip(self, zip_path, policy_path))]
    pub async fn ingest(
        &self,
        zip_path: &Path,
        policy_path: &Path,
    ) -> Result<IngestionReport, IngestionError> {
        let batch = self.batch_processor.process(zip_path, policy_path).await?;

        let documents = assemble_documents(&batch.outcomes, &batch.invoice_texts)?;
        let failed_adjudications = batch.processed() - documents.len();

        let documents_stored = self.index.add_documents(&documents).await?;

        tracing::info!(
            documents_stored,
            failed_adjudications,
            skipped = batch.skipped.len(),
            "Claim ingestion finished"
        );

        Ok(IngestionReport {
            status: batch.status(),
            documents_stored,
            skipped_files: batch.skipped,
            failed_adjudications,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("batch: {0}")]
    Batch(#[from] BatchError),
    #[error("assembly: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("index: {0}")]
    Index(#[from] VectorStoreAdapterError),
}
