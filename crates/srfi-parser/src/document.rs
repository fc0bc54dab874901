//! One specification document, fetched through the cache and scanned.

use std::sync::LazyLock;

use regex::Regex;
use srfi_core::UrlTemplate;
use srfi_core::urls::spec_cache_key;
use srfi_fetch::{ContentCache, Transport};

use crate::error::{DocumentError, ParseError};
use crate::extract::{Scan, TokenExtractor};

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SRFI \d+: ").expect("title prefix regex is valid"));

#[derive(Debug, Clone)]
pub struct SpecDocument {
    number: u32,
    scan: Scan,
}

impl SpecDocument {
    /// Fetch document `number` from the mirror (or the cache) and scan it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Fetch`] if the download fails and
    /// [`DocumentError::Parse`] if the bytes are not UTF-8.
    pub async fn load<T: Transport>(
        number: u32,
        cache: &ContentCache<T>,
        mirror: &UrlTemplate,
        extractor: &dyn TokenExtractor,
    ) -> Result<Self, DocumentError> {
        let bytes = cache
            .fetch(&spec_cache_key(number), &mirror.render(number))
            .await?;
        Ok(Self::parse(number, &bytes, extractor)?)
    }

    /// Scan already-fetched bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Encoding`] if `bytes` are not UTF-8.
    pub fn parse(
        number: u32,
        bytes: &[u8],
        extractor: &dyn TokenExtractor,
    ) -> Result<Self, ParseError> {
        let source = std::str::from_utf8(bytes).map_err(|_| ParseError::Encoding { number })?;
        let scan = extractor.scan(source);
        tracing::debug!(
            number,
            extractor = extractor.name(),
            candidates = scan.tokens.len(),
            "scanned document"
        );
        Ok(Self { number, scan })
    }

    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Document title with the `SRFI <n>: ` prefix removed.
    ///
    /// Whitespace runs collapse to one space, so multi-line titles stay on
    /// one line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingTitle`] if the document has no title.
    pub fn title(&self) -> Result<String, ParseError> {
        let raw = self.scan.title.as_deref().ok_or(ParseError::MissingTitle {
            number: self.number,
        })?;
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Ok(NUMBER_PREFIX.replace(&collapsed, "").trim().to_string())
    }

    /// Candidate symbol tokens in document order, duplicates kept.
    #[must_use]
    pub fn candidate_tokens(&self) -> &[String] {
        &self.scan.tokens
    }
}
