//! Entity structs built fresh by every pipeline run.

mod implementation;
mod specification;

pub use implementation::{Implementation, ImplementationManifest};
pub use specification::Specification;
