//! Remote document sources and download behaviour.

use serde::{Deserialize, Serialize};
use srfi_core::UrlTemplate;

fn default_user_agent() -> String {
    format!("srfi-index/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_secs() -> u64 {
    30
}

/// One fetch at a time unless configured otherwise.
const fn default_concurrency() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Canonical document URL, recorded in the index.
    #[serde(default = "UrlTemplate::official")]
    pub official_url: UrlTemplate,

    /// Mirror the documents are downloaded from.
    #[serde(default = "UrlTemplate::mirror")]
    pub mirror_url: UrlTemplate,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of documents fetched at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            official_url: UrlTemplate::official(),
            mirror_url: UrlTemplate::mirror(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}
