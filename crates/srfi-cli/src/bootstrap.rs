use std::path::Path;

use srfi_config::SrfiConfig;

use crate::cli::GlobalFlags;

/// Layered configuration for the project at `--config-dir` (default: cwd).
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SrfiConfig> {
    let project = flags.config_dir.as_deref().unwrap_or_else(|| Path::new("."));
    let config = SrfiConfig::load_with_dotenv(project)?;
    tracing::debug!(
        project = %project.display(),
        cache = %config.cache.dir.display(),
        output = %config.output.dir.display(),
        "configuration loaded"
    );
    Ok(config)
}
