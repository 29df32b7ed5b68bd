use std::path::Path;

use async_trait::async_trait;

/// Pulls plain text out of a document on disk.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn load_text(&self, path: &Path) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unreadable document: {0}")]
    Unreadable(String),
    #[error("no extractable text in {0}")]
    NoTextFound(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
