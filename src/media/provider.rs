use futures::StreamExt;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::item::RawRecord;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching a media feed.
///
/// None of these are fatal to a view: callers log them and keep whatever
/// collection they already have.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the 30-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body or file exceeded the 10MB size limit
    #[error("Feed too large")]
    TooLarge,
    /// Local feed file could not be read
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
    /// Body was not a JSON array
    #[error("Invalid feed JSON: {0}")]
    Decode(String),
}

/// A read-only source of raw media records.
pub trait MediaProvider: Send + Sync {
    /// Fetch the full record batch.
    fn fetch(&self) -> impl Future<Output = Result<Vec<RawRecord>, ProviderError>> + Send;
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a feed body into records.
///
/// The body must be a JSON array. Elements are decoded independently:
/// non-objects are skipped, and mistyped fields inside an object read as
/// absent.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<RawRecord>, ProviderError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let Value::Array(elements) = value else {
        return Err(ProviderError::Decode("expected a JSON array".to_string()));
    };

    let total = elements.len();
    let records: Vec<RawRecord> = elements
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|element| serde_json::from_value(element).ok())
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        tracing::warn!(skipped, total, "Malformed feed records skipped");
    }

    Ok(records)
}

// ============================================================================
// HTTP Provider
// ============================================================================

/// Fetches a JSON feed over HTTP(S).
#[derive(Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpProvider {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MediaProvider for HttpProvider {
    async fn fetch(&self) -> Result<Vec<RawRecord>, ProviderError> {
        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.client.get(&self.url).send())
            .await
            .map_err(|_| ProviderError::Timeout)?
            .map_err(ProviderError::Network)?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;
        let records = decode_records(&bytes)?;
        tracing::debug!(url = %self.url, records = records.len(), "Fetched media feed");
        Ok(records)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ProviderError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ProviderError::TooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ProviderError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ProviderError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

// ============================================================================
// File Provider
// ============================================================================

/// Reads a JSON feed from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MediaProvider for FileProvider {
    async fn fetch(&self) -> Result<Vec<RawRecord>, ProviderError> {
        let meta = tokio::fs::metadata(&self.path).await?;
        if meta.len() as usize > MAX_FEED_SIZE {
            return Err(ProviderError::TooLarge);
        }
        let bytes = tokio::fs::read(&self.path).await?;
        decode_records(&bytes)
    }
}

// ============================================================================
// Static Provider
// ============================================================================

/// Serves a fixed batch of records from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Arc<Vec<RawRecord>>,
}

impl StaticProvider {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

impl MediaProvider for StaticProvider {
    async fn fetch(&self) -> Result<Vec<RawRecord>, ProviderError> {
        Ok(self.records.as_ref().clone())
    }
}

// ============================================================================
// Source
// ============================================================================

/// A configured feed location: an `http(s)://` URL or a local file path.
#[derive(Clone)]
pub enum Source {
    Http(HttpProvider),
    File(FileProvider),
    Static(StaticProvider),
}

impl Source {
    /// Pick HTTP or file based on the location string.
    pub fn from_location(client: &reqwest::Client, location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Http(HttpProvider::new(client.clone(), trimmed))
        } else {
            Self::File(FileProvider::new(trimmed))
        }
    }

    /// Short description for logs and the status line.
    pub fn describe(&self) -> String {
        match self {
            Self::Http(p) => p.url().to_string(),
            Self::File(p) => p.path.display().to_string(),
            Self::Static(p) => format!("{} in-memory records", p.records.len()),
        }
    }
}

impl MediaProvider for Source {
    async fn fetch(&self) -> Result<Vec<RawRecord>, ProviderError> {
        match self {
            Self::Http(p) => p.fetch().await,
            Self::File(p) => p.fetch().await,
            Self::Static(p) => p.fetch().await,
        }
    }
}
