use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::CacheCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch, extract, and write the index files.
    Build(BuildArgs),
    /// Look up one specification by number.
    Spec(SpecArgs),
    /// Look up a symbol, or list every symbol.
    Symbol(SymbolArgs),
    /// Look up an implementation, or list every implementation.
    Impl(ImplArgs),
    /// Download cache management.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// Cache directory (overrides config).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    /// Directory for srfi.json, srfi.lisp, and implementation.json.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Lowest specification number.
    #[arg(long)]
    pub min: Option<u32>,
    /// Highest specification number.
    #[arg(long)]
    pub max: Option<u32>,
    /// Maximum in-flight downloads.
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Where to read a built index from.
#[derive(Clone, Debug, Args)]
pub struct IndexDirArgs {
    /// Directory holding the index files (overrides config).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SpecArgs {
    /// Specification number.
    pub number: u32,
    #[command(flatten)]
    pub index: IndexDirArgs,
}

#[derive(Clone, Debug, Args)]
pub struct SymbolArgs {
    /// Symbol name. Lists every symbol when omitted.
    pub name: Option<String>,
    #[command(flatten)]
    pub index: IndexDirArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ImplArgs {
    /// Implementation id. Lists every implementation when omitted.
    pub id: Option<String>,
    #[command(flatten)]
    pub index: IndexDirArgs,
}
