//! Cross-cutting error types.
//!
//! Stage-specific errors (`FetchError`, `ParseError`, `IndexError`, ...) live in
//! their own crates. They converge into `anyhow` inside `srfi-cli`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A URL template is missing its `{number}` placeholder.
    #[error("URL template '{0}' has no {{number}} placeholder")]
    InvalidTemplate(String),

    /// The range bounds are inverted.
    #[error("invalid specification range: min {min} is greater than max {max}")]
    InvalidRange { min: u32, max: u32 },
}
