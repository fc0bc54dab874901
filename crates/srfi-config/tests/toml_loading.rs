//! Integration tests for layered configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use std::path::{Path, PathBuf};

use figment::Jail;
use pretty_assertions::assert_eq;
use srfi_config::{ConfigError, SrfiConfig};

#[test]
fn project_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".srfi")?;
        jail.create_file(
            ".srfi/config.toml",
            r#"
[cache]
dir = "/var/cache/srfi"

[output]
dir = "public"

[range]
max = 170

[sources]
concurrency = 4
mirror_url = "https://mirror.example.org/srfi-{number}.html"
"#,
        )?;

        let config = SrfiConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.cache.dir, PathBuf::from("/var/cache/srfi"));
        assert_eq!(config.output.dir, PathBuf::from("public"));
        assert_eq!(config.range.min, 0);
        assert_eq!(config.range.max, 170);
        assert_eq!(config.sources.concurrency, 4);
        assert_eq!(
            config.sources.mirror_url.render(7),
            "https://mirror.example.org/srfi-7.html"
        );
        assert_eq!(config.implementations.len(), 2);
        Ok(())
    });
}

#[test]
fn implementation_list_replaces_builtin_manifests() {
    Jail::expect_with(|jail| {
        jail.create_dir(".srfi")?;
        jail.create_file(
            ".srfi/config.toml",
            r#"
[[implementations]]
id = "gauche"
title = "Gauche"
homepage_url = "https://practical-scheme.net/gauche/"
archive_url = "https://example.org/Gauche-0.9.6.tgz"
pattern = 'Gauche-.*?/lib/srfi-(\d+)\.scm'
"#,
        )?;

        let config = SrfiConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.implementations.len(), 1);
        assert_eq!(config.implementations[0].id, "gauche");
        assert_eq!(config.implementations[0].cache_key(), "Gauche-0.9.6.tgz");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".srfi")?;
        jail.create_file(".srfi/config.toml", "[range]\nmax = 100\n")?;
        jail.set_env("SRFI_RANGE__MAX", "20");
        jail.set_env("SRFI_SOURCES__TIMEOUT_SECS", "5");

        let config = SrfiConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.range.max, 20);
        assert_eq!(config.sources.timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn invalid_template_is_rejected_on_load() {
    Jail::expect_with(|jail| {
        jail.set_env("SRFI_SOURCES__OFFICIAL_URL", "https://example.org/index.html");

        let err = SrfiConfig::load_from(Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "sources.official_url"
        ));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".srfi")?;
        jail.create_file(".srfi/config.toml", "[range\nmax = ")?;

        let err = SrfiConfig::load_from(Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
