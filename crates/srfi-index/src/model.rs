//! The assembled index and its derived symbol map.

use std::collections::{BTreeMap, BTreeSet};

use srfi_core::views::{ImplementationView, SpecificationView};
use srfi_core::{Implementation, Specification};

/// Symbol name to the numbers of every specification defining it.
pub type SymbolIndex = BTreeMap<String, BTreeSet<u32>>;

/// Specifications keyed by number and implementations keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrfiIndex {
    specifications: BTreeMap<u32, Specification>,
    implementations: BTreeMap<String, Implementation>,
}

impl SrfiIndex {
    /// Assemble an index and cross-link supporting implementations.
    ///
    /// Input order does not matter: implementations are linked in id order,
    /// so every `supporting_implementations` list comes out sorted. Numbers an
    /// implementation claims that have no specification entry are not linked.
    #[must_use]
    pub fn assemble(
        specifications: impl IntoIterator<Item = Specification>,
        implementations: impl IntoIterator<Item = Implementation>,
    ) -> Self {
        let mut specifications: BTreeMap<u32, Specification> = specifications
            .into_iter()
            .map(|spec| (spec.number, spec))
            .collect();
        let implementations: BTreeMap<String, Implementation> = implementations
            .into_iter()
            .map(|implementation| (implementation.id.clone(), implementation))
            .collect();

        for spec in specifications.values_mut() {
            spec.supporting_implementations.clear();
        }
        for implementation in implementations.values() {
            for number in &implementation.specifications_supported {
                if let Some(spec) = specifications.get_mut(number) {
                    spec.supporting_implementations
                        .push(implementation.id.clone());
                }
            }
        }

        Self {
            specifications,
            implementations,
        }
    }

    /// Specifications in ascending number order.
    pub fn specifications(&self) -> impl Iterator<Item = &Specification> {
        self.specifications.values()
    }

    #[must_use]
    pub fn specification(&self, number: u32) -> Option<&Specification> {
        self.specifications.get(&number)
    }

    /// Implementations in id order.
    pub fn implementations(&self) -> impl Iterator<Item = &Implementation> {
        self.implementations.values()
    }

    #[must_use]
    pub fn implementation(&self, id: &str) -> Option<&Implementation> {
        self.implementations.get(id)
    }

    #[must_use]
    pub fn specification_views(&self) -> Vec<SpecificationView> {
        self.specifications().map(SpecificationView::from).collect()
    }

    #[must_use]
    pub fn implementation_views(&self) -> Vec<ImplementationView> {
        self.implementations().map(ImplementationView::from).collect()
    }

    /// Invert every specification's symbol set.
    ///
    /// Always recomputed, never stored.
    #[must_use]
    pub fn symbol_index(&self) -> SymbolIndex {
        let mut index = SymbolIndex::new();
        for spec in self.specifications.values() {
            for symbol in &spec.symbols {
                index.entry(symbol.clone()).or_default().insert(spec.number);
            }
        }
        index
    }

    /// Distinct symbols across all specifications.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.specifications
            .values()
            .flat_map(|spec| spec.symbols.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }
}
