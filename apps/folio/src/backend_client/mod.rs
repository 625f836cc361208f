/// Backend client: the single point of entry for calls to the ingestion and
/// question-answering service.
///
/// No other module talks to the backend over HTTP. Handlers and triggers hold
/// an `Arc<dyn KnowledgeBackend>` so tests can swap in a scripted stub.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::assistant::models::{Answer, AskRequest, IngestReceipt, IngestRequest};

#[cfg(test)]
pub mod stub;

const INGEST_PATH: &str = "/ingest";
const ASK_PATH: &str = "/ask";
/// Multipart part names expected by `/ingest`.
pub const CV_FIELD: &str = "cv";
pub const REPO_LINK_FIELD: &str = "repo_link";
/// Sent when the browser gave no file name; the backend only treats parts
/// with a file name as uploads.
const FALLBACK_FILE_NAME: &str = "cv";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response has no `answer` field")]
    MissingAnswer,

    #[error("response `answer` field is not text")]
    AnswerNotText,
}

/// The two operations the backend offers. Implement this to point the
/// front end at something other than the HTTP service.
#[async_trait]
pub trait KnowledgeBackend: Send + Sync {
    async fn ingest(&self, request: IngestRequest) -> Result<IngestReceipt, BackendError>;

    async fn ask(&self, question: &str) -> Result<Answer, BackendError>;
}

/// reqwest-backed client for the backend's `/ingest` and `/ask` routes.
#[derive(Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl KnowledgeBackend for HttpBackendClient {
    async fn ingest(&self, request: IngestRequest) -> Result<IngestReceipt, BackendError> {
        let IngestRequest { file, repo_link } = request;

        let mut form = multipart::Form::new();
        if let Some(file) = file {
            debug!(
                "Ingest upload: {} bytes, name={:?}, type={:?}",
                file.data.len(),
                file.file_name,
                file.content_type
            );
            let len = file.data.len() as u64;
            let mut part = multipart::Part::stream_with_length(file.data, len).file_name(
                file.file_name
                    .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string()),
            );
            if let Some(content_type) = file.content_type.as_deref() {
                part = part.mime_str(content_type)?;
            }
            form = form.part(CV_FIELD, part);
        }
        form = form.text(REPO_LINK_FIELD, repo_link);

        let response = self
            .client
            .post(self.url(INGEST_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Backend /ingest returned {}: {}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Any 2xx counts; the receipt is informational only.
        Ok(serde_json::from_str::<IngestReceipt>(&body).unwrap_or_default())
    }

    async fn ask(&self, question: &str) -> Result<Answer, BackendError> {
        let response = self
            .client
            .post(self.url(ASK_PATH))
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Backend /ask returned {}: {}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_answer(&body)
    }
}

/// Extracts the `answer` string from an `/ask` response body.
fn parse_answer(body: &str) -> Result<Answer, BackendError> {
    let value: Value = serde_json::from_str(body)?;
    match value.get("answer") {
        None | Some(Value::Null) => Err(BackendError::MissingAnswer),
        Some(Value::String(text)) => Ok(Answer { text: text.clone() }),
        Some(_) => Err(BackendError::AnswerNotText),
    }
}
