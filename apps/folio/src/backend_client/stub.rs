//! Scripted in-memory backend for handler and trigger tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{BackendError, KnowledgeBackend};
use crate::assistant::models::{Answer, IngestReceipt, IngestRequest};

#[derive(Debug, Clone)]
pub enum StubReply {
    Answer(String),
    Status(u16, String),
    MissingAnswer,
}

/// Unscripted questions are answered with `echo: <question>`.
#[derive(Default)]
pub struct StubBackend {
    ingest_failure: Option<(u16, String)>,
    receipt: IngestReceipt,
    replies: HashMap<String, StubReply>,
    delays: HashMap<String, Duration>,
    pub ingested: Mutex<Vec<IngestRequest>>,
    pub asked: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_ingest(mut self, status: u16, body: &str) -> Self {
        self.ingest_failure = Some((status, body.to_string()));
        self
    }

    pub fn with_receipt(mut self, receipt: IngestReceipt) -> Self {
        self.receipt = receipt;
        self
    }

    pub fn reply(mut self, question: &str, reply: StubReply) -> Self {
        self.replies.insert(question.to_string(), reply);
        self
    }

    pub fn delay(mut self, question: &str, delay: Duration) -> Self {
        self.delays.insert(question.to_string(), delay);
        self
    }
}

#[async_trait]
impl KnowledgeBackend for StubBackend {
    async fn ingest(&self, request: IngestRequest) -> Result<IngestReceipt, BackendError> {
        self.ingested.lock().unwrap().push(request);
        match &self.ingest_failure {
            Some((status, body)) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.receipt.clone()),
        }
    }

    async fn ask(&self, question: &str) -> Result<Answer, BackendError> {
        self.asked.lock().unwrap().push(question.to_string());
        if let Some(delay) = self.delays.get(question) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(question) {
            Some(StubReply::Answer(text)) => Ok(Answer { text: text.clone() }),
            Some(StubReply::Status(status, body)) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            Some(StubReply::MissingAnswer) => Err(BackendError::MissingAnswer),
            None => Ok(Answer {
                text: format!("echo: {question}"),
            }),
        }
    }
}
