//! # srfi-index
//!
//! Builds the SRFI index from cached documents and implementation archives,
//! encodes it canonically, and answers lookups over the written files.

pub mod builder;
pub mod db;
pub mod error;
pub mod model;
pub mod report;
pub mod serialize;

pub use builder::{BuildOutcome, BuildStep, IndexBuilder};
pub use db::IndexDb;
pub use error::{IndexError, LookupError};
pub use model::{SrfiIndex, SymbolIndex};
pub use report::{BuildFailure, BuildReport};
pub use serialize::{Serializer, StagedFile, WrittenFiles};
