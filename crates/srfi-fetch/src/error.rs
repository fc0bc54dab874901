//! Fetch error types.

use thiserror::Error;

/// Errors raised while filling the content cache.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection could not be established or the transfer broke off.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("GET {url} returned status {status}")]
    Status { status: u16, url: String },

    /// The remote returned 429 Too Many Requests.
    #[error("rate limited by {url}, retry after {retry_after_secs}s")]
    RateLimited { url: String, retry_after_secs: u64 },

    /// The cache key would escape the cache root or is empty.
    #[error("invalid cache key '{0}'")]
    InvalidKey(String),

    /// Local filesystem failure inside the cache root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
