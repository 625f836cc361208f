use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::assistant::models::TranscriptEntry;

/// Append-only log of answered questions for one page session.
/// Entries are never replaced or removed; there is no size bound.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Appends `entry` after every existing entry and returns the new length.
    pub fn append(&mut self, entry: TranscriptEntry) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}

/// Transcripts keyed by page session, shared through `AppState`.
///
/// The lock is only taken around in-memory work; callers await the backend
/// before appending, so entries land in response-arrival order.
#[derive(Debug, Default, Clone)]
pub struct TranscriptStore {
    sessions: Arc<RwLock<HashMap<Uuid, Transcript>>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, session: Uuid, entry: TranscriptEntry) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session).or_default().append(entry)
    }

    /// Snapshot of a session's entries; unknown sessions are simply empty.
    pub async fn entries(&self, session: Uuid) -> Vec<TranscriptEntry> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session)
            .map(|t| t.entries().to_vec())
            .unwrap_or_default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
