use std::path::Path;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;
use unicode_normalization::UnicodeNormalization;

use crate::application::ports::{FileLoader, FileLoaderError};

/// Reads the text layer of PDF files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::Unreadable(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::Unreadable(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let text = match doc.extract_text(page_index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(page = page_index + 1, error = %e, "Page has no readable text");
                    continue;
                }
            };

            if let Some(text) = page_text(&text) {
                pages.push(text);
            }
        }

        Ok(pages)
    }
}

/// NFKC-normalizes one page. Blank pages yield `None`.
fn page_text(raw: &str) -> Option<String> {
    let text: String = raw.nfkc().collect();
    (!text.trim().is_empty()).then_some(text)
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, path), fields(file = %path.display()))]
    async fn load_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let owned_path = path.to_path_buf();
        let pages = tokio::task::spawn_blocking(move || Self::extract_pages(&owned_path))
            .await
            .map_err(|e| FileLoaderError::Unreadable(format!("task join error: {e}")))??;

        let page_count = pages.len();
        let text = pages.join("\n").trim().to_string();

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(file_name));
        }

        tracing::info!(page_count, chars = text.len(), "PDF text extraction complete");
        Ok(text)
    }
}
