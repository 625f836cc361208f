use std::sync::Arc;

use crate::assistant::transcript::TranscriptStore;
use crate::backend_client::KnowledgeBackend;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Ingestion / question-answering backend. `HttpBackendClient` in production.
    pub backend: Arc<dyn KnowledgeBackend>,
    /// Per-session transcripts. Lives for the life of the process.
    pub transcripts: TranscriptStore,
    pub config: Config,
}
