use anyhow::{bail, Context, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ingestion / question-answering backend, no trailing slash.
    pub backend_url: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    /// Upper bound on the ingest form body, file included.
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = normalize_backend_url(
            &lookup("FOLIO_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        )?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let request_timeout_secs = match lookup("FOLIO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("FOLIO_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if request_timeout_secs == 0 {
            bail!("FOLIO_REQUEST_TIMEOUT_SECS must be > 0");
        }

        let max_upload_bytes = match lookup("FOLIO_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("FOLIO_MAX_UPLOAD_BYTES must be a byte count")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            backend_url,
            port,
            request_timeout_secs,
            max_upload_bytes,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn normalize_backend_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("FOLIO_BACKEND_URL must start with http:// or https:// (got '{raw}')");
    }
    Ok(trimmed.to_string())
}
