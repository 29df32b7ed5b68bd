use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    ArchiveError, ArchiveExtractor, FileLoader, FileLoaderError, LlmClient,
};
use crate::domain::{BatchOutcome, BatchStatus};

use super::claim_adjudicator::ClaimAdjudicator;
use super::text_normalizer::{collapse_whitespace, normalize_invoice_text};

/// Runs every invoice in an uploaded archive through adjudication.
///
/// Invoices are handled one after another. A file that cannot be read is
/// recorded as skipped and the batch moves on; only a bad policy document or
/// a bad archive aborts the run.
pub struct ClaimBatchProcessor<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    file_loader: Arc<F>,
    archive_extractor: Arc<dyn ArchiveExtractor>,
    adjudicator: ClaimAdjudicator<L>,
}

impl<F, L> ClaimBatchProcessor<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub fn new(
        file_loader: Arc<F>,
        archive_extractor: Arc<dyn ArchiveExtractor>,
        llm_client: Arc<L>,
    ) -> Self {
        Self {
            file_loader,
            archive_extractor,
            adjudicator: ClaimAdjudicator::new(llm_client),
        }
    }

    #[tracing::instrument(
        skip(self, zip_path, policy_path),
        fields(archive = %zip_path.display(), policy = %policy_path.display())
    )]
    pub async fn process(
        &self,
        zip_path: &Path,
        policy_path: &Path,
    ) -> Result<BatchOutcome, BatchError> {
        let policy_text = self
            .file_loader
            .load_text(policy_path)
            .await
            .map_err(BatchError::PolicyUnreadable)?;
        let policy_text = collapse_whitespace(&policy_text);

        // Removed on drop, including every early return below.
        let scratch = tempfile::Builder::new()
            .prefix("claim-batch-")
            .tempdir()
            .map_err(BatchError::Scratch)?;

        let extractor = Arc::clone(&self.archive_extractor);
        let archive = zip_path.to_path_buf();
        let destination = scratch.path().to_path_buf();

        tracing::info!(scratch = %destination.display(), "Extracting invoice archive");

        let invoices = tokio::task::spawn_blocking(move || {
            extractor.extract_pdfs(&archive, &destination)
        })
        .await
        .map_err(|e| BatchError::TaskFailed(e.to_string()))??;

        tracing::debug!(count = invoices.len(), "Invoice PDFs found in archive");

        let mut batch = BatchOutcome::default();

        for invoice_path in &invoices {
            let file_name = invoice_path
                .strip_prefix(scratch.path())
                .unwrap_or(invoice_path)
                .display()
                .to_string();

            let raw_text = match self.file_loader.load_text(invoice_path).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(file = %file_name, error = %e, "Could not read invoice, skipping");
                    batch.skip(file_name, e.to_string());
                    continue;
                }
            };

            let invoice_text = normalize_invoice_text(&raw_text);
            let outcome = self
                .adjudicator
                .adjudicate(&invoice_text, &policy_text)
                .await;

            batch.push(outcome, invoice_text);
        }

        if let Err(e) = scratch.close() {
            tracing::warn!(error = %e, "Failed to clean up scratch directory");
        }

        match batch.status() {
            BatchStatus::NothingProcessed => tracing::warn!(
                skipped = batch.skipped.len(),
                "No invoices could be processed"
            ),
            status => tracing::info!(
                processed = batch.processed(),
                skipped = batch.skipped.len(),
                complete = status == BatchStatus::Complete,
                "Invoice batch analysed"
            ),
        }

        Ok(batch)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("policy document unreadable: {0}")]
    PolicyUnreadable(FileLoaderError),
    #[error("archive: {0}")]
    Archive(#[from] ArchiveError),
    #[error("scratch directory: {0}")]
    Scratch(std::io::Error),
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}
