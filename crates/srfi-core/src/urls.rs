//! URL templates and cache-key naming for specification documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const PLACEHOLDER: &str = "{number}";

/// Official home of each specification document.
pub const DEFAULT_OFFICIAL_URL: &str = "https://srfi.schemers.org/srfi-{number}/srfi-{number}.html";

/// Raw mirror the documents are actually downloaded from.
pub const DEFAULT_MIRROR_URL: &str = "https://raw.githubusercontent.com/scheme-requests-for-implementation/srfi-{number}/master/srfi-{number}.html";

/// A URL with one or more `{number}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTemplate`] if `template` has no `{number}`.
    pub fn new(template: impl Into<String>) -> Result<Self, CoreError> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(CoreError::InvalidTemplate(template));
        }
        Ok(Self(template))
    }

    #[must_use]
    pub fn official() -> Self {
        Self(DEFAULT_OFFICIAL_URL.to_string())
    }

    #[must_use]
    pub fn mirror() -> Self {
        Self(DEFAULT_MIRROR_URL.to_string())
    }

    #[must_use]
    pub fn render(&self, number: u32) -> String {
        self.0.replace(PLACEHOLDER, &number.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local cache key for a specification document.
///
/// Independent of the mirror URL so switching mirrors keeps the cache warm.
#[must_use]
pub fn spec_cache_key(number: u32) -> String {
    format!("srfi-{number}.html")
}

/// Last path segment of `url`, ignoring any query string or fragment.
///
/// Returns `None` for URLs ending in `/`.
#[must_use]
pub fn url_basename(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next()?;
    (!name.is_empty() && !name.contains(':')).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_placeholder() {
        assert_eq!(
            UrlTemplate::official().render(42),
            "https://srfi.schemers.org/srfi-42/srfi-42.html"
        );
        assert_eq!(
            UrlTemplate::mirror().render(1),
            "https://raw.githubusercontent.com/scheme-requests-for-implementation/srfi-1/master/srfi-1.html"
        );
    }

    #[test]
    fn template_requires_placeholder() {
        assert!(matches!(
            UrlTemplate::new("https://example.org/srfi.html"),
            Err(CoreError::InvalidTemplate(_))
        ));
        assert!(UrlTemplate::new("https://example.org/{number}.html").is_ok());
    }

    #[test]
    fn cache_key_is_decoupled_from_url() {
        assert_eq!(spec_cache_key(42), "srfi-42.html");
    }

    #[test]
    fn basename_of_archive_urls() {
        assert_eq!(
            url_basename("https://ftp.gnu.org/gnu/guile/guile-2.2.4.tar.gz"),
            Some("guile-2.2.4.tar.gz")
        );
        assert_eq!(
            url_basename("http://example.org/dist/pkg.tgz?mirror=1#top"),
            Some("pkg.tgz")
        );
        assert_eq!(url_basename("http://example.org/dist/"), None);
        assert_eq!(url_basename("http://example.org"), Some("example.org"));
    }
}
