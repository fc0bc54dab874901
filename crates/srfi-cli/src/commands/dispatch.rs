use srfi_config::SrfiConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &SrfiConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Build(args) => commands::build::handle(&args, config, flags).await,
        Commands::Spec(args) => commands::lookup::handle_spec(&args, config, flags),
        Commands::Symbol(args) => commands::lookup::handle_symbol(&args, config, flags),
        Commands::Impl(args) => commands::lookup::handle_impl(&args, config, flags),
        Commands::Cache { action } => commands::cache::handle(&action, config, flags),
    }
}
