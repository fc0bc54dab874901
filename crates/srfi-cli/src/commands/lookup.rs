use std::path::Path;

use anyhow::Context;
use srfi_config::SrfiConfig;
use srfi_index::IndexDb;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ImplArgs, IndexDirArgs, SpecArgs, SymbolArgs};
use crate::output::output;

fn open(args: &IndexDirArgs, config: &SrfiConfig) -> anyhow::Result<IndexDb> {
    let dir: &Path = args.output_dir.as_deref().unwrap_or(&config.output.dir);
    IndexDb::open(dir).with_context(|| {
        format!(
            "no readable index in {}; run `srfidx build` first",
            dir.display()
        )
    })
}

/// Handle `srfidx spec <number>`.
pub fn handle_spec(args: &SpecArgs, config: &SrfiConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let db = open(&args.index, config)?;
    output(&db.specification(args.number)?, flags.format)
}

/// Handle `srfidx symbol [<name>]`.
pub fn handle_symbol(
    args: &SymbolArgs,
    config: &SrfiConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open(&args.index, config)?;
    match &args.name {
        Some(name) => output(&db.symbol(name)?, flags.format),
        None => output(&db.symbols(), flags.format),
    }
}

/// Handle `srfidx impl [<id>]`.
pub fn handle_impl(args: &ImplArgs, config: &SrfiConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let db = open(&args.index, config)?;
    match &args.id {
        Some(id) => output(&db.implementation(id)?, flags.format),
        None => output(&db.implementations(), flags.format),
    }
}
