//! What a build produced and what it had to skip.

use serde::{Deserialize, Serialize};

/// One item that contributed an empty payload instead of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFailure {
    /// `srfi-<n>` or `implementation <id>`.
    pub item: String,
    pub error: String,
}

impl BuildFailure {
    pub fn specification(number: u32, error: &impl std::fmt::Display) -> Self {
        Self {
            item: format!("srfi-{number}"),
            error: error.to_string(),
        }
    }

    pub fn implementation(id: &str, error: &impl std::fmt::Display) -> Self {
        Self {
            item: format!("implementation {id}"),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub specifications: usize,
    pub symbols: usize,
    pub implementations: usize,
    /// Specification failures by number, then implementation failures by id.
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
