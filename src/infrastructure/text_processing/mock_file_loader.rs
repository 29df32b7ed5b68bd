use std::path::Path;

use crate::application::ports::{FileLoader, FileLoaderError};

const PDF_MAGIC: &str = "%PDF";

/// Stand-in for [`PdfAdapter`](super::PdfAdapter) over plain-text fixtures.
///
/// A fixture is a `%PDF` header line followed by the page text. Anything
/// without the header is reported as unreadable, the way a corrupt PDF is.
pub struct MockFileLoader;

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn load_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let data = tokio::fs::read(path).await?;
        let content = String::from_utf8(data)
            .map_err(|e| FileLoaderError::Unreadable(e.to_string()))?;

        let Some(body) = content.strip_prefix(PDF_MAGIC) else {
            return Err(FileLoaderError::Unreadable(format!(
                "{} has no PDF header",
                path.display()
            )));
        };

        let text = body.split_once('\n').map(|(_, rest)| rest).unwrap_or("").trim();
        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(path.display().to_string()));
        }

        Ok(text.to_string())
    }
}
