//! Trust-on-first-write content cache.
//!
//! A key that exists on disk is returned as-is: no revalidation, no expiry,
//! no re-fetch. Misses stream into a temporary file inside the cache root
//! and are renamed over the key path only after the transfer completes, so a
//! failed or interrupted download never leaves a file visible under the key.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::FetchError;
use crate::transport::Transport;

const PARTIAL_PREFIX: &str = ".download-";
const PARTIAL_SUFFIX: &str = ".part";

/// Explicit root directory of the on-disk cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePath(PathBuf);

/// One committed cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub size_bytes: u64,
}

impl CachePath {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.0
    }

    /// Location of `key` under the root.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidKey`] for empty or absolute keys, keys
    /// with `..` components, and names reserved for partial downloads.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(key);
        let well_formed = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !well_formed || is_partial_name(key) {
            return Err(FetchError::InvalidKey(key.to_string()));
        }
        Ok(self.0.join(relative))
    }

    /// Committed entries directly under the root, sorted by key.
    ///
    /// A missing root is an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] if the directory cannot be read.
    pub fn entries(&self) -> Result<Vec<CacheEntry>, FetchError> {
        let mut entries = Vec::new();
        for entry in read_dir_or_empty(&self.0)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let key = entry.file_name().to_string_lossy().to_string();
            if !metadata.is_file() || is_partial_name(&key) {
                continue;
            }
            entries.push(CacheEntry {
                key,
                size_bytes: metadata.len(),
            });
        }
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    /// Delete temporary files left behind by interrupted downloads.
    ///
    /// Committed keys are never touched. Returns how many files were removed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] if the directory cannot be read or a file
    /// cannot be removed.
    pub fn clean_partial(&self) -> Result<usize, FetchError> {
        let mut removed = 0;
        for entry in read_dir_or_empty(&self.0)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if is_partial_name(&name) && entry.metadata()?.is_file() {
                fs::remove_file(entry.path())?;
                tracing::debug!(file = %name, "removed partial download");
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn is_partial_name(name: &str) -> bool {
    name.starts_with(PARTIAL_PREFIX) && name.ends_with(PARTIAL_SUFFIX)
}

fn read_dir_or_empty(dir: &Path) -> Result<Vec<std::io::Result<fs::DirEntry>>, FetchError> {
    match fs::read_dir(dir) {
        Ok(iter) => Ok(iter.collect()),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(error) => Err(error.into()),
    }
}

fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, FetchError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Maps cache keys to local bytes, downloading on first miss.
///
/// Safe to share between concurrent fetches: distinct keys proceed in
/// parallel, same-key fetches are serialized so a resource is downloaded once.
pub struct ContentCache<T> {
    root: CachePath,
    transport: T,
    key_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<T: Transport> ContentCache<T> {
    pub fn new(root: CachePath, transport: T) -> Self {
        Self {
            root,
            transport,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn root(&self) -> &CachePath {
        &self.root
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Bytes stored under `key`, fetching them from `source` on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the key is invalid, the transport fails, or
    /// the cache directory cannot be written.
    pub async fn fetch(&self, key: &str, source: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.root.path_for(key)?;
        if let Some(bytes) = read_if_present(&path)? {
            tracing::debug!(key, "cache hit");
            return Ok(bytes);
        }

        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        // Another task may have filled the key while we waited.
        if let Some(bytes) = read_if_present(&path)? {
            tracing::debug!(key, "cache hit after wait");
            return Ok(bytes);
        }

        tracing::info!(key, url = source, "downloading");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(self.root.root())?;

        let mut partial = tempfile::Builder::new()
            .prefix(PARTIAL_PREFIX)
            .suffix(PARTIAL_SUFFIX)
            .tempfile_in(self.root.root())?;
        let written = self
            .transport
            .download(source, partial.as_file_mut())
            .await?;
        partial.as_file().sync_all()?;
        partial
            .persist(&path)
            .map_err(|error| FetchError::Io(error.error))?;
        tracing::debug!(key, bytes = written, "cached");

        // The file is visible now, so later callers never reach the lock.
        // Waiters keep their own handle and re-check under it.
        self.release_key_lock(key);

        Ok(fs::read(&path)?)
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    fn release_key_lock(&self, key: &str) {
        self.key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    #[cfg(test)]
    fn pending_locks(&self) -> usize {
        self.key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
