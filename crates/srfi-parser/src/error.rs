//! Parser error types.

use srfi_fetch::FetchError;

/// The expected markup shape is absent from a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("SRFI {number}: document is not valid UTF-8")]
    Encoding { number: u32 },

    #[error("SRFI {number}: document has no <title>")]
    MissingTitle { number: u32 },
}

/// Errors from opening or querying an implementation archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive has no entries")]
    Empty,

    #[error("malformed archive: {0}")]
    Malformed(#[from] std::io::Error),

    #[error("invalid entry pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("archive entry not found: {0}")]
    MissingEntry(String),
}

/// Why a specification document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
