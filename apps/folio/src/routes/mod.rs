pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_new_session))
        .route("/s/:session", get(handlers::handle_page))
        .route(
            "/s/:session/ingest",
            post(handlers::handle_ingest).layer(upload_limit),
        )
        .route("/s/:session/ask", post(handlers::handle_ask))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::assistant::transcript::TranscriptStore;
    use crate::backend_client::stub::StubBackend;
    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState {
            backend: Arc::new(StubBackend::new()),
            transcripts: TranscriptStore::new(),
            config: Config::from_lookup(|_| None).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio");
        assert_eq!(body["backend_url"], "http://localhost:8000");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected() {
        let app = build_router(AppState {
            backend: Arc::new(StubBackend::new()),
            transcripts: TranscriptStore::new(),
            config: Config::from_lookup(|key| {
                (key == "FOLIO_MAX_UPLOAD_BYTES").then(|| "64".to_string())
            })
            .unwrap(),
        });
        let boundary = "b";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"cv\"; filename=\"cv.txt\"\r\n\r\n{}\r\n--{boundary}--\r\n",
            "x".repeat(1024)
        );

        let response = app
            .oneshot(
                Request::post(format!("/s/{}/ingest", uuid::Uuid::new_v4()))
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
