//! The "fetch bytes from a URL" seam.

use std::future::Future;
use std::io::Write;

use crate::error::FetchError;

/// Streams the body behind `url` into `sink`.
///
/// Implementations return the number of bytes written. A failed download may
/// leave a prefix of the body in `sink`; the cache never exposes it.
pub trait Transport: Send + Sync {
    fn download(
        &self,
        url: &str,
        sink: &mut (dyn Write + Send),
    ) -> impl Future<Output = Result<u64, FetchError>> + Send;
}
