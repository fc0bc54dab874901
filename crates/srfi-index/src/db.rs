//! Read-only query surface over written index files.
//!
//! Loads `srfi.json` and `implementation.json`, relinks supporting
//! implementations from the listing, and recomputes the symbol map. Nothing
//! derived is read from disk.

use std::collections::BTreeMap;
use std::path::Path;

use srfi_core::views::{ImplementationView, SpecificationView, SymbolDefinition, SymbolView};
use srfi_core::{Implementation, Specification};

use crate::error::{IndexError, LookupError};
use crate::model::{SrfiIndex, SymbolIndex};
use crate::serialize::{IMPLEMENTATION_JSON, SRFI_JSON};

#[derive(Debug, Clone)]
pub struct IndexDb {
    index: SrfiIndex,
    symbols: SymbolIndex,
}

impl IndexDb {
    /// Load the index files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if a file cannot be read and
    /// [`IndexError::Json`] if one does not parse.
    pub fn open(dir: &Path) -> Result<Self, IndexError> {
        let specs: BTreeMap<String, SpecificationView> =
            serde_json::from_slice(&std::fs::read(dir.join(SRFI_JSON))?)?;
        let implementations: Vec<ImplementationView> =
            serde_json::from_slice(&std::fs::read(dir.join(IMPLEMENTATION_JSON))?)?;
        tracing::debug!(
            dir = %dir.display(),
            specifications = specs.len(),
            implementations = implementations.len(),
            "loaded index"
        );
        Ok(Self::from_index(SrfiIndex::assemble(
            specs.into_values().map(Specification::from),
            implementations.into_iter().map(Implementation::from),
        )))
    }

    #[must_use]
    pub fn from_index(index: SrfiIndex) -> Self {
        let symbols = index.symbol_index();
        Self { index, symbols }
    }

    #[must_use]
    pub const fn index(&self) -> &SrfiIndex {
        &self.index
    }

    /// Every specification, ascending by number.
    #[must_use]
    pub fn specifications(&self) -> Vec<SpecificationView> {
        self.index.specification_views()
    }

    /// # Errors
    ///
    /// `UnknownKey("SRFI not found")` if no entry has this number.
    pub fn specification(&self, number: u32) -> Result<SpecificationView, LookupError> {
        self.index
            .specification(number)
            .map(SpecificationView::from)
            .ok_or(LookupError::UnknownKey("SRFI not found"))
    }

    /// Every symbol with its definitions, ascending by specification number.
    #[must_use]
    pub fn symbols(&self) -> BTreeMap<String, Vec<SymbolDefinition>> {
        self.symbols
            .iter()
            .map(|(name, numbers)| (name.clone(), definitions(numbers)))
            .collect()
    }

    /// # Errors
    ///
    /// `UnknownKey("Symbol not found")` if no specification defines `name`.
    pub fn symbol(&self, name: &str) -> Result<SymbolView, LookupError> {
        let numbers = self
            .symbols
            .get(name)
            .ok_or(LookupError::UnknownKey("Symbol not found"))?;
        Ok(SymbolView {
            name: name.to_string(),
            definitions: definitions(numbers),
        })
    }

    #[must_use]
    pub fn implementations(&self) -> Vec<ImplementationView> {
        self.index.implementation_views()
    }

    /// # Errors
    ///
    /// `UnknownKey("Implementation not found")` for an unknown id.
    pub fn implementation(&self, id: &str) -> Result<ImplementationView, LookupError> {
        self.index
            .implementation(id)
            .map(ImplementationView::from)
            .ok_or(LookupError::UnknownKey("Implementation not found"))
    }
}

fn definitions<'a>(numbers: impl IntoIterator<Item = &'a u32>) -> Vec<SymbolDefinition> {
    numbers
        .into_iter()
        .map(|&number| SymbolDefinition::in_srfi(number))
        .collect()
}
