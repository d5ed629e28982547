use crate::formatting::ColorMode;
use crate::report::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "statematch")]
#[command(about = "Find the U.S. states that match how you want to live", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: nearest .statematch.toml)
    #[arg(long, global = true, env = "STATEMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory with states.* and questions.* (default: bundled data)
    #[arg(long, global = true, env = "STATEMATCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the saved quiz session
    #[arg(long, global = true, env = "STATEMATCH_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Plain ASCII output (no colors, no emoji)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the quiz and save your answers
    Quiz {
        /// Read answers from a JSON file ({"question_id": "choice_id", ...})
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Show your matching states
    Results {
        /// Show every rank (requires a completed checkout)
        #[arg(long)]
        full: bool,

        /// Include the per-question score breakdown
        #[arg(long)]
        explain: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of ranked states (overrides scoring.result_count)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Unlock the full report
    Checkout {
        /// Where to send the report
        #[arg(long)]
        email: String,
    },

    /// Email the full report
    SendReport {
        /// Recipient (defaults to the checkout email)
        #[arg(long)]
        email: Option<String>,
    },

    /// Print share text and social links for your top matches
    Share {
        /// Also copy the share text to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Ask the support assistant a question
    Support {
        /// Ask a single question instead of starting a conversation
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Validate a dataset directory
    CheckData {
        /// Directory to check (defaults to --data-dir or the bundled data)
        dir: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Forget the saved quiz session
    Reset,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Quiz { .. } => "quiz",
            Self::Results { .. } => "results",
            Self::Checkout { .. } => "checkout",
            Self::SendReport { .. } => "send-report",
            Self::Share { .. } => "share",
            Self::Support { .. } => "support",
            Self::CheckData { .. } => "check-data",
            Self::Init { .. } => "init",
            Self::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_results_flags() {
        let cli = Cli::parse_from([
            "statematch",
            "results",
            "--full",
            "--format",
            "json",
            "--top",
            "10",
            "--session-dir",
            "/tmp/s",
        ]);

        match cli.command {
            Commands::Results {
                full, format, top, ..
            } => {
                assert!(full);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(top, Some(10));
            }
            _ => panic!("Expected Results command"),
        }
        assert_eq!(cli.global.session_dir, Some(PathBuf::from("/tmp/s")));
    }

    #[test]
    fn parses_init_force() {
        let cli = Cli::parse_from(["statematch", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn counts_verbosity() {
        let cli = Cli::parse_from(["statematch", "-vv", "reset"]);
        assert_eq!(cli.global.verbosity, 2);
        assert_eq!(cli.command.name(), "reset");
    }
}
