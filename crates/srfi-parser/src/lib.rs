//! # srfi-parser
//!
//! Signal extraction for the SRFI index:
//! - [`ArchiveIndex`]: which numbered entries an implementation archive ships
//! - [`SpecDocument`]: title and candidate tokens of one specification
//! - [`TokenExtractor`]: markup-convention strategy, [`HtmlCodeSpans`] for HTML
//! - [`is_symbol`]: allow-list filter from candidate tokens to symbol names
//!
//! This is not an HTML parser in the general sense; it only reads the
//! conventions specification authors use for call examples.

pub mod archive;
pub mod document;
pub mod error;
pub mod extract;
pub mod html;
pub mod symbol;

pub use archive::ArchiveIndex;
pub use document::SpecDocument;
pub use error::{ArchiveError, DocumentError, ParseError};
pub use extract::{Scan, TokenExtractor, call_head};
pub use html::HtmlCodeSpans;
pub use symbol::is_symbol;
