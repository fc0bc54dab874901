use std::path::PathBuf;

use clap::Subcommand;

/// Download cache management.
#[derive(Clone, Debug, Subcommand)]
pub enum CacheCommands {
    /// List cached documents and archives.
    List {
        /// Cache directory (overrides config).
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Remove temporary files left by interrupted downloads.
    Clean {
        /// Cache directory (overrides config).
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}
