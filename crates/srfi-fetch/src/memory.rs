//! In-memory transport for offline runs and tests.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use crate::error::FetchError;
use crate::transport::Transport;

#[derive(Debug, Clone)]
enum Body {
    Complete(Vec<u8>),
    /// Writes the prefix, then fails as a dropped connection would.
    Truncated(Vec<u8>),
}

/// Serves fixed bodies by URL and counts every request.
///
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    bodies: HashMap<String, Body>,
    requests: Mutex<HashMap<String, usize>>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), Body::Complete(body.into()));
        self
    }

    #[must_use]
    pub fn with_truncated(mut self, url: impl Into<String>, prefix: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), Body::Truncated(prefix.into()));
        self
    }

    /// How many times `url` was requested.
    #[must_use]
    pub fn requests(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Total requests across all URLs.
    #[must_use]
    pub fn total_requests(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .sum()
    }
}

impl Transport for MemoryTransport {
    async fn download(
        &self,
        url: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, FetchError> {
        *self
            .requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(url.to_string())
            .or_default() += 1;

        match self.bodies.get(url) {
            Some(Body::Complete(bytes)) => {
                sink.write_all(bytes)?;
                Ok(bytes.len() as u64)
            }
            Some(Body::Truncated(prefix)) => {
                sink.write_all(prefix)?;
                Err(FetchError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    format!("connection reset while reading {url}"),
                )))
            }
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
