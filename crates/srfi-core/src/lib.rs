//! # srfi-core
//!
//! Core types shared by every crate of the SRFI index:
//! - Entity structs for specifications and implementations
//! - The closed specification-number range
//! - URL templates and cache-key naming for specification documents
//! - Boundary view types returned by the query surface
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod range;
pub mod urls;
pub mod views;

pub use entities::{Implementation, ImplementationManifest, Specification};
pub use errors::CoreError;
pub use range::{MAX_SRFI_NUMBER, MIN_SRFI_NUMBER, SpecRange};
pub use urls::UrlTemplate;
