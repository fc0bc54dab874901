//! Read-only view over a downloaded `.tar` / `.tar.gz` archive.
//!
//! Only entry paths are kept in memory; entry bodies are read back from the
//! raw archive bytes on demand.

use std::collections::BTreeSet;
use std::io::Read;

use flate2::read::GzDecoder;
use regex::Regex;

use crate::error::ArchiveError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone)]
pub struct ArchiveIndex {
    raw: Vec<u8>,
    paths: Vec<String>,
}

impl ArchiveIndex {
    /// Scan every entry of the archive.
    ///
    /// Gzip compression is detected from the magic bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Malformed`] for corrupt or unsupported bytes
    /// and [`ArchiveError::Empty`] if no entry could be read.
    pub fn open(bytes: impl Into<Vec<u8>>) -> Result<Self, ArchiveError> {
        let raw = bytes.into();
        let paths = scan_paths(&raw)?;
        if paths.is_empty() {
            return Err(ArchiveError::Empty);
        }
        tracing::debug!(entries = paths.len(), "opened archive");
        Ok(Self { raw, paths })
    }

    /// Entry paths in archive order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Numbers captured by `pattern` across all entry paths.
    ///
    /// `pattern` is anchored at the start of each path. The first capture
    /// group is parsed as an integer; paths whose capture is not a number
    /// are skipped. The result is sorted and free of duplicates, so a
    /// directory entry and the files beneath it count once.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Pattern`] if `pattern` does not compile.
    pub fn entries_matching(&self, pattern: &str) -> Result<Vec<u32>, ArchiveError> {
        let regex = Regex::new(&format!("^(?:{pattern})"))?;
        let numbers: BTreeSet<u32> = self
            .paths
            .iter()
            .filter_map(|path| regex.captures(path))
            .filter_map(|captures| captures.get(1))
            .filter_map(|capture| capture.as_str().parse().ok())
            .collect();
        Ok(numbers.into_iter().collect())
    }

    /// Contents of the entry at `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MissingEntry`] if no entry has that path.
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut archive = tar::Archive::new(reader_for(&self.raw));
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.path()?.to_string_lossy() == name {
                let mut data = Vec::new();
                entry.read_to_end(&mut data)?;
                return Ok(data);
            }
        }
        Err(ArchiveError::MissingEntry(name.to_string()))
    }
}

fn scan_paths(raw: &[u8]) -> Result<Vec<String>, ArchiveError> {
    let mut paths = Vec::new();
    let mut archive = tar::Archive::new(reader_for(raw));
    for entry in archive.entries()? {
        let entry = entry?;
        paths.push(entry.path()?.to_string_lossy().into_owned());
    }
    Ok(paths)
}

fn reader_for(raw: &[u8]) -> Box<dyn Read + '_> {
    if raw.starts_with(&GZIP_MAGIC) {
        Box::new(GzDecoder::new(raw))
    } else {
        Box::new(raw)
    }
}
