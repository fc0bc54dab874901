use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use srfi_config::SrfiConfig;
use srfi_core::SpecRange;
use srfi_fetch::{CachePath, ContentCache, HttpTransport};
use srfi_index::{BuildReport, BuildStep, IndexBuilder, Serializer, WrittenFiles};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BuildArgs;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct BuildResponse {
    #[serde(flatten)]
    report: BuildReport,
    files: WrittenFiles,
}

/// Handle `srfidx build`.
pub async fn handle(args: &BuildArgs, config: &SrfiConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let range = SpecRange::new(
        args.min.unwrap_or(config.range.min),
        args.max.unwrap_or(config.range.max),
    )?;
    let concurrency = args.concurrency.unwrap_or(config.sources.concurrency);
    if concurrency == 0 {
        anyhow::bail!("--concurrency must be at least 1");
    }
    let cache_dir = args.cache_dir.as_ref().unwrap_or(&config.cache.dir);
    let output_dir = args.output_dir.as_ref().unwrap_or(&config.output.dir);

    let transport = HttpTransport::new(
        &config.sources.user_agent,
        Duration::from_secs(config.sources.timeout_secs),
    )
    .context("failed to create HTTP client")?;
    let cache = ContentCache::new(CachePath::new(cache_dir), transport);

    let builder = IndexBuilder::new(&cache)
        .range(range)
        .urls(
            config.sources.official_url.clone(),
            config.sources.mirror_url.clone(),
        )
        .implementations(config.implementations.clone())
        .concurrency(concurrency);
    let progress = Progress::bar(builder.total_steps() as u64, "indexing");
    let builder = builder.on_step(|step| match step {
        BuildStep::Specification(number) => progress.advance(&format!("srfi-{number}")),
        BuildStep::Implementation(id) => progress.advance(id),
    });

    let outcome = builder.build().await;
    progress.finish_clear();

    let files = Serializer::new(output_dir)
        .write(&outcome.index)
        .with_context(|| format!("failed to write index files to {}", output_dir.display()))?;

    if !outcome.report.is_clean() {
        tracing::warn!(
            failures = outcome.report.failures.len(),
            "some items were recorded without data"
        );
    }

    output(
        &BuildResponse {
            report: outcome.report,
            files,
        },
        flags.format,
    )
}
