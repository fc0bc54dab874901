use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::urls::url_basename;

/// A language implementation and the specifications its archive ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implementation {
    pub id: String,
    pub title: String,
    pub homepage_url: String,
    pub specifications_supported: BTreeSet<u32>,
}

/// Where to find an implementation's distributed archive and how to read
/// supported specification numbers out of its file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationManifest {
    pub id: String,
    pub title: String,
    pub homepage_url: String,
    pub archive_url: String,
    /// Local cache file name. Defaults to the last segment of `archive_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
    /// Anchored regex applied to every archive entry path; capture group 1
    /// is the specification number.
    pub pattern: String,
}

impl ImplementationManifest {
    /// Resolved cache key for the archive.
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.cache_key
            .clone()
            .or_else(|| url_basename(&self.archive_url).map(str::to_string))
            .unwrap_or_else(|| format!("{}.tar.gz", self.id))
    }

    /// The manifests shipped with the index.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self {
                id: "chibi".to_string(),
                title: "Chibi-Scheme".to_string(),
                homepage_url: "http://synthcode.com/wiki/chibi-scheme".to_string(),
                archive_url: "http://synthcode.com/scheme/chibi/chibi-scheme-0.8.0.tgz"
                    .to_string(),
                cache_key: None,
                pattern: r"chibi-scheme-.*?/lib/srfi/(\d+)\.sld".to_string(),
            },
            // Some SRFI implementations are single files, others are directories.
            Self {
                id: "guile".to_string(),
                title: "Guile".to_string(),
                homepage_url: "https://www.gnu.org/software/guile/".to_string(),
                archive_url: "https://ftp.gnu.org/gnu/guile/guile-2.2.4.tar.gz".to_string(),
                cache_key: None,
                pattern: r"guile-.*?/module/srfi/srfi-(\d+)".to_string(),
            },
        ]
    }
}
