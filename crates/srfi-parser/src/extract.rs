//! Pluggable token extraction, one strategy per markup convention.

use std::sync::LazyLock;

use regex::Regex;

/// Opening parenthesis followed by a run of non-space, non-paren characters.
static CALL_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([^\s()]+)").expect("call-head regex is valid"));

/// What a strategy found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Raw text of the document title, if the markup has one.
    pub title: Option<String>,
    /// Candidate symbol tokens in document order, duplicates kept.
    pub tokens: Vec<String>,
}

/// A markup convention that yields a title and candidate symbol tokens.
pub trait TokenExtractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn scan(&self, source: &str) -> Scan;
}

/// Head of a procedure-call example: `"(fold kons knil lis)"` → `fold`.
///
/// Leading and trailing whitespace of `span` is ignored.
#[must_use]
pub fn call_head(span: &str) -> Option<&str> {
    CALL_HEAD
        .captures(span.trim())
        .and_then(|captures| captures.get(1))
        .map(|head| head.as_str())
}

#[cfg(test)]
mod tests {
    use super::call_head;

    #[test]
    fn takes_first_token_after_paren() {
        assert_eq!(call_head("(fold kons knil lis)"), Some("fold"));
        assert_eq!(call_head("  (vector-map f v)\n"), Some("vector-map"));
        assert_eq!(call_head("(car)"), Some("car"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(call_head("fold"), None);
        assert_eq!(call_head("( fold)"), None);
        assert_eq!(call_head("((lambda (x) x) 1)"), None);
        assert_eq!(call_head(""), None);
        assert_eq!(call_head("x (fold)"), None);
    }
}
