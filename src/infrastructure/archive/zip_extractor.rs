use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::application::ports::{ArchiveError, ArchiveExtractor};

/// Unpacks ZIP uploads onto disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiveExtractor;

impl ZipArchiveExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for ZipArchiveExtractor {
    fn extract_pdfs(
        &self,
        archive: &Path,
        destination: &Path,
    ) -> Result<Vec<PathBuf>, ArchiveError> {
        let file = File::open(archive).map_err(|e| ArchiveError::Open(e.to_string()))?;
        let mut zip = ZipArchive::new(BufReader::new(file))
            .map_err(|e| ArchiveError::Invalid(e.to_string()))?;

        let mut pdfs = Vec::new();
        let mut written = HashSet::new();

        for index in 0..zip.len() {
            let mut entry = zip
                .by_index(index)
                .map_err(|e| ArchiveError::Invalid(e.to_string()))?;

            if entry.is_dir() {
                continue;
            }

            let Some(relative) = sanitize_entry_path(entry.name()) else {
                tracing::warn!(entry = %entry.name(), "Skipping archive entry with unsafe path");
                continue;
            };

            let target = destination.join(relative);
            if !written.insert(target.clone()) {
                tracing::warn!(entry = %entry.name(), "Skipping archive entry that repeats an earlier path");
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut output = File::create(&target)?;
            io::copy(&mut entry, &mut output)?;

            if is_pdf(&target) {
                pdfs.push(target);
            }
        }

        pdfs.sort();
        tracing::debug!(entries = zip.len(), pdfs = pdfs.len(), "Archive extracted");
        Ok(pdfs)
    }
}

/// Keeps only normal components so entries like `../../etc/passwd` cannot
/// escape the destination. Returns `None` when nothing is left.
fn sanitize_entry_path(name: &str) -> Option<PathBuf> {
    let sanitized: PathBuf = Path::new(name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    (!sanitized.as_os_str().is_empty()).then_some(sanitized)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
