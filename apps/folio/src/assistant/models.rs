use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document picked in the page's file control.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// One ingestion submission. Neither field is validated: an absent file or an
/// empty link is forwarded as-is and the backend decides.
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    pub file: Option<UploadedFile>,
    pub repo_link: String,
}

/// What the backend reports after a successful ingestion, when it says anything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IngestReceipt {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chunks: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
}

/// One question/answer exchange in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}
