//! Index error types.

use srfi_fetch::FetchError;
use srfi_parser::{ArchiveError, DocumentError};

/// Errors from building, encoding, writing, or loading the index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A string holds a character the nested-list reader cannot read back.
    #[error("unsafe character {ch:?} in {value:?}")]
    UnsafeCharacter { ch: char, value: String },

    /// Canonical JSON is printable ASCII only.
    #[error("non-ASCII character {ch:?} in JSON output")]
    NonAscii { ch: char },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Archive names a specification number outside the build range.
    #[error("SRFI {number} is outside the indexed range")]
    OutOfRange { number: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A lookup miss. Carries only a short reason fit for an end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{0}")]
    UnknownKey(&'static str),
}
