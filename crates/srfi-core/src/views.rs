//! Fixed-shape records exchanged at the index boundary.
//!
//! These are what gets serialized to `srfi.json` / `implementation.json` and
//! what the query surface hands out. Internal maps never cross the boundary.

use serde::{Deserialize, Serialize};

use crate::entities::{Implementation, Specification};

/// One entry of the JSON index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationView {
    pub number: u32,
    pub title: String,
    pub official_html_url: String,
    pub github_html_url: String,
    pub symbols: Vec<String>,
    pub implementations: Vec<String>,
}

impl From<&Specification> for SpecificationView {
    fn from(spec: &Specification) -> Self {
        Self {
            number: spec.number,
            title: spec.title.clone(),
            official_html_url: spec.canonical_url.clone(),
            github_html_url: spec.mirror_url.clone(),
            symbols: spec.symbols.iter().cloned().collect(),
            implementations: spec.supporting_implementations.clone(),
        }
    }
}

/// One entry of `implementation.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationView {
    pub id: String,
    pub title: String,
    pub homepage_url: String,
    pub srfi_implemented: Vec<u32>,
}

impl From<&Implementation> for ImplementationView {
    fn from(implementation: &Implementation) -> Self {
        Self {
            id: implementation.id.clone(),
            title: implementation.title.clone(),
            homepage_url: implementation.homepage_url.clone(),
            srfi_implemented: implementation
                .specifications_supported
                .iter()
                .copied()
                .collect(),
        }
    }
}

impl From<ImplementationView> for Implementation {
    fn from(view: ImplementationView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            homepage_url: view.homepage_url,
            specifications_supported: view.srfi_implemented.into_iter().collect(),
        }
    }
}

/// Reloading a persisted entry. Supporting implementations are dropped;
/// they are relinked from the implementation listing.
impl From<SpecificationView> for Specification {
    fn from(view: SpecificationView) -> Self {
        Self {
            number: view.number,
            title: view.title,
            canonical_url: view.official_html_url,
            mirror_url: view.github_html_url,
            symbols: view.symbols.into_iter().collect(),
            supporting_implementations: Vec::new(),
        }
    }
}

/// Where a symbol is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSite {
    /// Always `srfi` for now.
    #[serde(rename = "type")]
    pub kind: String,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDefinition {
    pub defined_in: DefinitionSite,
    /// Always `procedure`: the extractor cannot tell syntax from procedures.
    #[serde(rename = "type")]
    pub kind: String,
}

impl SymbolDefinition {
    #[must_use]
    pub fn in_srfi(number: u32) -> Self {
        Self {
            defined_in: DefinitionSite {
                kind: "srfi".to_string(),
                number,
            },
            kind: "procedure".to_string(),
        }
    }
}

/// Response for a single symbol lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolView {
    pub name: String,
    pub definitions: Vec<SymbolDefinition>,
}
