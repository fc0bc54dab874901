use std::collections::BTreeSet;

/// One numbered specification document and what the index knows about it.
///
/// A record exists for every number in the build range, even when its
/// document could not be fetched or parsed (then `title` is empty and
/// `symbols` is empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    pub number: u32,
    pub title: String,
    pub canonical_url: String,
    pub mirror_url: String,
    /// Case-sensitive, deduplicated, lexicographically ordered.
    pub symbols: BTreeSet<String>,
    /// Implementation ids in append order (ascending id).
    pub supporting_implementations: Vec<String>,
}

impl Specification {
    /// An entry with no title and no symbols.
    #[must_use]
    pub fn empty(number: u32, canonical_url: String, mirror_url: String) -> Self {
        Self {
            number,
            title: String::new(),
            canonical_url,
            mirror_url,
            symbols: BTreeSet::new(),
            supporting_implementations: Vec::new(),
        }
    }
}
