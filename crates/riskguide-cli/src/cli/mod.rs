//! CLI command definitions for the `riskguide` binary.
//!
//! Uses clap derive macros for argument parsing. Each subcommand maps to one
//! view of the assessment: the interview itself, the guidance it leads to,
//! and a few diagnostics over the local store.

pub mod guidance;
pub mod interview;
pub mod language;
pub mod logout;
pub mod profile;
pub mod status;
pub mod store;

use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use riskguide_types::locale::Locale;

/// Cancer-risk self-assessment with personalized guidance.
#[derive(Parser)]
#[command(name = "riskguide", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print only command results and errors; no banners, notices, or spinners.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export completion spans as OpenTelemetry traces on stdout.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer the assessment questions and get your results.
    Interview {
        /// Discard previous results before starting.
        #[arg(long)]
        fresh: bool,
    },

    /// Show your personalized health guidance.
    Guidance {
        /// Print HTML instead of terminal-formatted text.
        #[arg(long)]
        html: bool,
    },

    /// Show your answer summary and guidance.
    Profile {
        /// Print HTML instead of terminal-formatted text.
        #[arg(long)]
        html: bool,
    },

    /// Show which results are stored and your risk level.
    Status,

    /// Inspect the raw session store.
    Store {
        #[command(subcommand)]
        command: StoreCommand,
    },

    /// Show or change the output language.
    #[command(alias = "lang")]
    Language {
        /// New language (en or gu). Omit to show the current one.
        locale: Option<Locale>,

        /// Also delete stored results generated in the previous language.
        #[arg(long)]
        clear_artifacts: bool,
    },

    /// Delete everything stored on this device.
    Logout {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum StoreCommand {
    /// List every stored key.
    #[command(alias = "ls")]
    List,

    /// Print the raw value of one key.
    Get {
        /// Key to read (e.g. user_summary).
        key: String,
    },
}

/// How a command writes to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Styled,
    Json,
    /// Results only: decorations and progress are dropped.
    Quiet,
}

impl OutputMode {
    /// `--json` wins over `--quiet`.
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Quiet,
            (false, false) => OutputMode::Styled,
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputMode::Json
    }

    /// Whether banners, notices, and spinners are shown.
    pub fn is_styled(self) -> bool {
        self == OutputMode::Styled
    }
}

/// Start a spinner with the given message; hidden unless output is styled.
pub(crate) fn spinner(message: &str, mode: OutputMode) -> ProgressBar {
    if !mode.is_styled() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["riskguide", "interview", "--fresh", "--ephemeral", "-vv"])
            .unwrap();
        assert!(cli.ephemeral);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Interview { fresh: true }));
    }

    #[test]
    fn test_output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Styled);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Json);

        let cli = Cli::try_parse_from(["riskguide", "profile", "--quiet"]).unwrap();
        let mode = OutputMode::from_flags(cli.json, cli.quiet);
        assert!(!mode.is_styled());
        assert!(!mode.is_json());
    }

    #[test]
    fn test_quiet_spinner_is_hidden() {
        assert!(spinner("working", OutputMode::Quiet).is_hidden());
        assert!(spinner("working", OutputMode::Json).is_hidden());
    }

    #[test]
    fn test_parse_language_locale() {
        let cli = Cli::try_parse_from(["riskguide", "language", "gu"]).unwrap();
        match cli.command {
            Commands::Language { locale, clear_artifacts } => {
                assert_eq!(locale, Some(Locale::Gu));
                assert!(!clear_artifacts);
            }
            _ => panic!("expected language command"),
        }

        assert!(Cli::try_parse_from(["riskguide", "language", "fr"]).is_err());
    }

    #[test]
    fn test_parse_store_get() {
        let cli = Cli::try_parse_from(["riskguide", "store", "get", "user_summary"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Store { command: StoreCommand::Get { ref key } } if key == "user_summary"
        ));
    }
}
