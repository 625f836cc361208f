use axum::extract::Multipart;
use tracing::{debug, info, warn};

use crate::assistant::models::{IngestReceipt, IngestRequest, UploadedFile};
use crate::backend_client::{BackendError, KnowledgeBackend, CV_FIELD, REPO_LINK_FIELD};
use crate::errors::AppError;
use crate::render::Notice;

/// Reads the page's ingest form into an `IngestRequest`.
///
/// Browsers submit an empty, nameless `cv` part when no file is picked; that
/// becomes `file: None`. Unknown fields are skipped. A `repo_link` that is
/// not valid UTF-8 is rejected rather than decoded lossily.
pub async fn read_ingest_form(mut multipart: Multipart) -> Result<IngestRequest, AppError> {
    let mut request = IngestRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            CV_FIELD => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                if file_name.is_some() || !data.is_empty() {
                    request.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            REPO_LINK_FIELD => {
                let raw = field.bytes().await?;
                request.repo_link = std::str::from_utf8(&raw)
                    .map_err(|_| {
                        AppError::Validation("repo_link must be UTF-8 text".to_string())
                    })?
                    .to_string();
            }
            other => debug!("Ignoring unexpected ingest form field '{other}'"),
        }
    }

    Ok(request)
}

/// Ingestion Trigger: forwards the upload and reports the backend's verdict.
pub async fn run_ingest(
    backend: &dyn KnowledgeBackend,
    request: IngestRequest,
) -> Result<IngestReceipt, BackendError> {
    let file_bytes = request.file.as_ref().map(|f| f.data.len());
    let has_link = !request.repo_link.is_empty();

    match backend.ingest(request).await {
        Ok(receipt) => {
            info!(
                "Ingestion accepted: file_bytes={:?}, repo_link={}, status={:?}, chunks={:?}",
                file_bytes, has_link, receipt.status, receipt.chunks
            );
            Ok(receipt)
        }
        Err(e) => {
            warn!("Ingestion failed: {e}");
            Err(e)
        }
    }
}

/// Only a successful call is acknowledged as ingested.
pub fn ingest_notice(result: &Result<IngestReceipt, BackendError>) -> Notice {
    match result {
        Ok(IngestReceipt {
            chunks: Some(chunks),
            ..
        }) => Notice::Success(format!("Knowledge ingested ({chunks} chunks)")),
        Ok(_) => Notice::Success("Knowledge ingested".to_string()),
        Err(e) => Notice::Failure(format!("Ingestion failed: {e}")),
    }
}
