// Page-facing behaviour: the ingestion and query triggers, the transcript
// they feed, and the handlers that wire form posts to them.
// All backend traffic goes through backend_client.

pub mod handlers;
pub mod ingest;
pub mod models;
pub mod query;
pub mod transcript;
