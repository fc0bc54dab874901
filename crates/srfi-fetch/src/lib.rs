//! # srfi-fetch
//!
//! Download cache for specification documents and implementation archives.
//!
//! - [`CachePath`]: explicit cache root, threaded in by the caller
//! - [`ContentCache`]: trust-on-first-write key → bytes store with atomic fills
//! - [`Transport`]: the "fetch bytes from a URL" seam, with [`HttpTransport`]
//!   for the network and [`MemoryTransport`] for offline fixtures

mod cache;
mod error;
mod http;
mod memory;
mod transport;

pub use cache::{CacheEntry, CachePath, ContentCache};
pub use error::FetchError;
pub use http::HttpTransport;
pub use memory::MemoryTransport;
pub use transport::Transport;
