//! `reqwest`-backed transport.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing,
//! non-success → [`FetchError::Status`]) so the cache only sees bytes.

use std::io::Write;
use std::time::Duration;

use crate::error::FetchError;
use crate::transport::Transport;

/// Streams response bodies over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the TLS backend cannot be initialized.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn download(
        &self,
        url: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, FetchError> {
        let mut resp = check_response(self.http.get(url).send().await?, url).await?;
        let mut written = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            sink.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        sink.flush()?;
        Ok(written)
    }
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`FetchError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`FetchError::Status`].
pub async fn check_response(
    resp: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, FetchError> {
    if resp.status() == 429 {
        return Err(FetchError::RateLimited {
            url: url.to_string(),
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
