//! # srfi-config
//!
//! Layered configuration for the SRFI index using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SRFI_*` prefix, `__` as separator)
//! 2. Project-level `.srfi/config.toml`
//! 3. User-level `~/.config/srfi/config.toml`
//! 4. Built-in defaults
//!
//! `SRFI_SOURCES__CONCURRENCY=4` maps to `sources.concurrency`,
//! `SRFI_RANGE__MAX=200` to `range.max`, and so on.
//!
//! ```toml
//! [cache]
//! dir = ".cache"
//!
//! [range]
//! min = 0
//! max = 165
//!
//! [[implementations]]
//! id = "chibi"
//! title = "Chibi-Scheme"
//! homepage_url = "http://synthcode.com/wiki/chibi-scheme"
//! archive_url = "http://synthcode.com/scheme/chibi/chibi-scheme-0.8.0.tgz"
//! pattern = 'chibi-scheme-.*?/lib/srfi/(\d+)\.sld'
//! ```

mod error;
mod paths;
mod sources;

pub use error::ConfigError;
pub use paths::{CacheConfig, OutputConfig};
pub use sources::SourcesConfig;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use srfi_core::{ImplementationManifest, SpecRange, UrlTemplate};

/// Project-local config file, relative to the project directory.
pub const PROJECT_CONFIG_FILE: &str = ".srfi/config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SrfiConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub range: SpecRange,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default = "ImplementationManifest::builtin")]
    pub implementations: Vec<ImplementationManifest>,
}

impl Default for SrfiConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            range: SpecRange::default(),
            sources: SourcesConfig::default(),
            implementations: ImplementationManifest::builtin(),
        }
    }
}

impl SrfiConfig {
    /// Load and validate configuration for the current directory.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load and validate configuration, reading `<project>/.srfi/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_from(project: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from `project` (or the current directory) first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv(project: &Path) -> Result<Self, ConfigError> {
        let env_path = project.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load_from(project)
    }

    /// Build the figment provider chain for the current directory.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment_for(project: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = project.join(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SRFI_").split("__"))
    }

    /// Check cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        SpecRange::new(self.range.min, self.range.max)
            .map_err(|error| ConfigError::invalid("range", error.to_string()))?;

        for (field, template) in [
            ("sources.official_url", &self.sources.official_url),
            ("sources.mirror_url", &self.sources.mirror_url),
        ] {
            UrlTemplate::new(template.as_str())
                .map_err(|error| ConfigError::invalid(field, error.to_string()))?;
        }

        if self.sources.concurrency == 0 {
            return Err(ConfigError::invalid(
                "sources.concurrency",
                "must be at least 1",
            ));
        }
        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "sources.timeout_secs",
                "must be at least 1",
            ));
        }

        let mut seen = BTreeSet::new();
        for manifest in &self.implementations {
            let field = format!("implementations.{}", manifest.id);
            if manifest.id.is_empty() {
                return Err(ConfigError::invalid("implementations.id", "must not be empty"));
            }
            if !seen.insert(manifest.id.as_str()) {
                return Err(ConfigError::invalid(field, "duplicate implementation id"));
            }
            let pattern = regex::Regex::new(&manifest.pattern)
                .map_err(|error| ConfigError::invalid(&field, error.to_string()))?;
            if pattern.captures_len() < 2 {
                return Err(ConfigError::invalid(
                    field,
                    "pattern needs a capture group for the specification number",
                ));
            }
        }

        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srfi").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SrfiConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.range, SpecRange::default());
        assert_eq!(config.implementations.len(), 2);
        assert_eq!(config.cache.dir, PathBuf::from(".cache"));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let mut config = SrfiConfig::default();
        config.sources.concurrency = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "sources.concurrency"));
    }

    #[test]
    fn rejects_duplicate_implementation_ids() {
        let mut config = SrfiConfig::default();
        let first = config.implementations[0].clone();
        config.implementations.push(first);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate implementation id"));
    }

    #[test]
    fn rejects_pattern_without_capture_group() {
        let mut config = SrfiConfig::default();
        config.implementations[0].pattern = r"chibi-scheme-.*?/lib/srfi/\d+\.sld".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("capture group"));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut config = SrfiConfig::default();
        config.range = SpecRange { min: 9, max: 2 };
        assert!(config.validate().is_err());
    }
}
