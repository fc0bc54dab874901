use std::path::PathBuf;

use serde::Serialize;
use srfi_config::SrfiConfig;
use srfi_fetch::CachePath;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CacheCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CacheEntryRow {
    key: String,
    size_bytes: u64,
}

#[derive(Debug, Serialize)]
struct CacheListResponse {
    dir: PathBuf,
    entries: Vec<CacheEntryRow>,
    total_bytes: u64,
}

#[derive(Debug, Serialize)]
struct CacheCleanResponse {
    dir: PathBuf,
    removed_partial: usize,
}

/// Handle `srfidx cache`.
pub fn handle(action: &CacheCommands, config: &SrfiConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CacheCommands::List { cache_dir } => {
            let cache = CachePath::new(cache_dir.as_ref().unwrap_or(&config.cache.dir));
            let entries: Vec<CacheEntryRow> = cache
                .entries()?
                .into_iter()
                .map(|entry| CacheEntryRow {
                    key: entry.key,
                    size_bytes: entry.size_bytes,
                })
                .collect();
            let total_bytes = entries.iter().map(|entry| entry.size_bytes).sum();
            output(
                &CacheListResponse {
                    dir: cache.root().to_path_buf(),
                    entries,
                    total_bytes,
                },
                flags.format,
            )
        }
        CacheCommands::Clean { cache_dir } => {
            let cache = CachePath::new(cache_dir.as_ref().unwrap_or(&config.cache.dir));
            let removed_partial = cache.clean_partial()?;
            tracing::info!(removed_partial, "cleaned interrupted downloads");
            output(
                &CacheCleanResponse {
                    dir: cache.root().to_path_buf(),
                    removed_partial,
                },
                flags.format,
            )
        }
    }
}
