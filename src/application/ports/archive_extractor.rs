use std::path::{Path, PathBuf};

/// Unpacks an uploaded archive into a scratch directory.
pub trait ArchiveExtractor: Send + Sync {
    /// Extracts every entry under `destination` and returns the paths of the
    /// extracted PDF files, sorted.
    fn extract_pdfs(&self, archive: &Path, destination: &Path)
    -> Result<Vec<PathBuf>, ArchiveError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("cannot open archive: {0}")]
    Open(String),
    #[error("invalid archive: {0}")]
    Invalid(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
