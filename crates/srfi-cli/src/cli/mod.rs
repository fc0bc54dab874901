use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `srfidx` binary.
#[derive(Debug, Parser)]
#[command(
    name = "srfidx",
    version,
    about = "SRFI index - symbols, titles, and implementation support"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw, text
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory holding .srfi/config.toml (defaults to cwd)
    #[arg(short, long, global = true)]
    pub config_dir: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config_dir: self.config_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::CacheCommands;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_flags_parse() {
        let cli = Cli::try_parse_from([
            "srfidx",
            "build",
            "--min",
            "1",
            "--max",
            "20",
            "--concurrency",
            "4",
            "--output-dir",
            "out",
        ])
        .expect("cli should parse");

        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.min, Some(1));
        assert_eq!(args.max, Some(20));
        assert_eq!(args.concurrency, Some(4));
        assert_eq!(args.output_dir.as_deref(), Some(Path::new("out")));
        assert_eq!(args.cache_dir, None);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["srfidx", "spec", "1", "--format", "text", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Spec(ref args) if args.number == 1));
    }

    #[test]
    fn symbol_name_is_optional() {
        let all = Cli::try_parse_from(["srfidx", "symbol"]).expect("cli should parse");
        assert!(matches!(all.command, Commands::Symbol(ref args) if args.name.is_none()));

        let one = Cli::try_parse_from(["srfidx", "symbol", "list->vector"])
            .expect("cli should parse");
        assert!(
            matches!(one.command, Commands::Symbol(ref args) if args.name.as_deref() == Some("list->vector"))
        );
    }

    #[test]
    fn spec_number_must_be_numeric() {
        assert!(Cli::try_parse_from(["srfidx", "spec", "one"]).is_err());
    }

    #[test]
    fn cache_subcommands_parse() {
        let cli = Cli::try_parse_from(["srfidx", "cache", "clean", "--cache-dir", "/tmp/c"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Cache {
                action: CacheCommands::Clean { cache_dir: Some(_) }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["srfidx", "--format", "xml", "impl"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["srfidx", "--config-dir", "/tmp/demo", "impl", "chibi"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config_dir.as_deref(), Some(Path::new("/tmp/demo")));
        assert_eq!(flags.format, OutputFormat::Json);
    }
}
