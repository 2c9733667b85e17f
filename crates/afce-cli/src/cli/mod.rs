use clap::Parser;

pub mod global;
pub mod repl;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `afce` binary.
#[derive(Debug, Parser)]
#[command(
    name = "afce",
    version,
    about = "AFCE-M - patient state-space dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seed for patient seeding and geometry jitter (overrides engine.seed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use afce_core::perturbation::Challenge;
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["afce", "--format", "table", "--seed", "7", "--verbose", "state"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.seed, Some(7));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::State));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["afce", "radar", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Radar));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["afce", "--format", "xml", "state"]).is_err());
    }

    #[test]
    fn perturb_parses_challenge_aliases() {
        let cli = Cli::try_parse_from(["afce", "perturb", "immune", "--rounds", "3"])
            .expect("cli should parse");
        match cli.command {
            Commands::Perturb(args) => {
                assert_eq!(args.challenge, Challenge::ImmuneTrigger);
                assert_eq!(args.rounds, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn perturb_rejects_unknown_challenge() {
        assert!(Cli::try_parse_from(["afce", "perturb", "thermal"]).is_err());
    }

    #[test]
    fn ask_joins_trailing_words() {
        let cli = Cli::try_parse_from(["afce", "ask", "how", "stable", "is", "it?", "--image", "scan.png"])
            .expect("cli should parse");
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.text(), "how stable is it?");
                assert_eq!(args.image.as_deref(), Some(std::path::Path::new("scan.png")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["afce", "--seed", "42", "geometry"]).expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.seed, Some(42));
        assert_eq!(flags.format, OutputFormat::Json);
    }
}
