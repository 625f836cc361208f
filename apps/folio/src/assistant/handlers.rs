//! Axum route handlers for the page and its two forms.

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::assistant::ingest::{ingest_notice, read_ingest_form, run_ingest};
use crate::assistant::query::{query_failure_notice, run_query};
use crate::errors::AppError;
use crate::render::{render_page, Notice, PageView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

/// GET /
///
/// Starts a new page session with an empty transcript.
pub async fn handle_new_session() -> Redirect {
    Redirect::to(&format!("/s/{}", Uuid::new_v4()))
}

/// GET /s/:session
pub async fn handle_page(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
) -> Html<String> {
    render_session(&state, session, None).await
}

/// POST /s/:session/ingest
pub async fn handle_ingest(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let request = read_ingest_form(multipart).await?;
    let result = run_ingest(state.backend.as_ref(), request).await;
    let notice = ingest_notice(&result);
    Ok(render_session(&state, session, Some(&notice)).await)
}

/// POST /s/:session/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
    Form(form): Form<AskForm>,
) -> Html<String> {
    let notice = run_query(
        state.backend.as_ref(),
        &state.transcripts,
        session,
        form.question,
    )
    .await
    .err()
    .map(|e| query_failure_notice(&e));

    render_session(&state, session, notice.as_ref()).await
}

async fn render_session(
    state: &AppState,
    session: Uuid,
    notice: Option<&Notice>,
) -> Html<String> {
    let entries = state.transcripts.entries(session).await;
    Html(render_page(&PageView {
        session,
        notice,
        entries: &entries,
    }))
}
