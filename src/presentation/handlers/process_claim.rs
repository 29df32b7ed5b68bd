use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::{Multipart, State};
use axum::extract::multipart::Field;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient, VectorStore};
use crate::domain::SkippedFile;
use crate::presentation::state::AppState;

const INVOICE_FIELD: &str = "invoice_file";
const POLICY_FIELD: &str = "policy_file";

#[derive(Debug, Serialize)]
pub struct ProcessClaimResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_stored: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_files: Option<Vec<SkippedFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_adjudications: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessClaimResponse {
    fn failure(status: StatusCode, error: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                success: false,
                documents_stored: None,
                skipped_files: None,
                failed_adjudications: None,
                error: Some(error.into()),
            }),
        )
            .into_response()
    }
}

/// Writes one upload into the staging directory under a fixed name, so the
/// client-supplied file name never reaches the filesystem.
async fn stage(field: Field<'_>, destination: PathBuf) -> Result<PathBuf, String> {
    let data = field
        .bytes()
        .await
        .map_err(|e| format!("Failed to read upload: {}", e))?;

    tokio::fs::write(&destination, &data)
        .await
        .map_err(|e| format!("Failed to stage upload: {}", e))?;

    tracing::debug!(path = %destination.display(), bytes = data.len(), "Upload staged");
    Ok(destination)
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_claim_handler<F, L, V>(
    State(state): State<AppState<F, L, V>>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
{
    let staging = match tempfile::Builder::new().prefix("claim-upload-").tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create upload directory");
            return ProcessClaimResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to prepare upload storage",
            );
        }
    };

    let mut invoice_path: Option<PathBuf> = None;
    let mut policy_path: Option<PathBuf> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed multipart body");
                return ProcessClaimResponse::failure(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        tracing::debug!(
            field = %name,
            file_name = field.file_name().unwrap_or("unknown"),
            "Received upload field"
        );

        let (slot, file_name) = match name.as_str() {
            INVOICE_FIELD => (&mut invoice_path, "invoices.zip"),
            POLICY_FIELD => (&mut policy_path, "policy.pdf"),
            _ => {
                tracing::debug!(field = %name, "Ignoring unexpected multipart field");
                continue;
            }
        };

        match stage(field, staging.path().join(file_name)).await {
            Ok(path) => *slot = Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "Upload could not be staged");
                return ProcessClaimResponse::failure(StatusCode::BAD_REQUEST, e);
            }
        }
    }

    let (Some(invoice_path), Some(policy_path)) = (invoice_path, policy_path) else {
        tracing::warn!("Claim request missing an upload");
        return ProcessClaimResponse::failure(
            StatusCode::BAD_REQUEST,
            format!("Both '{}' and '{}' are required", INVOICE_FIELD, POLICY_FIELD),
        );
    };

    ingest(&state, &invoice_path, &policy_path).await
}

async fn ingest<F, L, V>(state: &AppState<F, L, V>, zip_path: &Path, policy_path: &Path) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
{
    match state.ingestion_service.ingest(zip_path, policy_path).await {
        Ok(report) => {
            tracing::info!(
                status = ?report.status,
                documents_stored = report.documents_stored,
                skipped = report.skipped_files.len(),
                failed_adjudications = report.failed_adjudications,
                "Claim batch processed"
            );
            (
                StatusCode::OK,
                Json(ProcessClaimResponse {
                    success: true,
                    documents_stored: Some(report.documents_stored),
                    skipped_files: Some(report.skipped_files),
                    failed_adjudications: Some(report.failed_adjudications),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Claim batch failed");
            ProcessClaimResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
