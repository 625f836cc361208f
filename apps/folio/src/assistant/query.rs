use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assistant::models::TranscriptEntry;
use crate::assistant::transcript::TranscriptStore;
use crate::backend_client::{BackendError, KnowledgeBackend};
use crate::render::Notice;

/// Query Trigger: asks the backend and appends the answer to the session's
/// transcript.
///
/// The append happens after the backend responds, so overlapping calls land
/// in the order their responses arrive. On error the transcript is untouched.
pub async fn run_query(
    backend: &dyn KnowledgeBackend,
    transcripts: &TranscriptStore,
    session: Uuid,
    question: String,
) -> Result<TranscriptEntry, BackendError> {
    let answer = match backend.ask(&question).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Question failed for session {session}: {e}");
            return Err(e);
        }
    };

    let entry = TranscriptEntry {
        question,
        answer: answer.text,
        answered_at: Utc::now(),
    };
    let len = transcripts.append(session, entry.clone()).await;
    info!(
        "Answer appended to session {session} (entry {len}, {} chars)",
        entry.answer.len()
    );

    Ok(entry)
}

pub fn query_failure_notice(error: &BackendError) -> Notice {
    Notice::Failure(format!("Question failed: {error}"))
}
