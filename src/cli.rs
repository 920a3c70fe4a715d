//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::credentials::Provider;
use crate::core::itinerary::NamePolicy;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  plate-planner                                   Launch the interactive planner
  plate-planner plan --from-text \"3 days in Austin, BBQ, 2 people\"
  plate-planner plan --answers trip.json --html itinerary.html
  plate-planner extract itinerary.md              Store restaurants from a Markdown file
  plate-planner places --policy meal-labeled      Show normalized restaurant names
  plate-planner reviews                           Look up reviews for stored restaurants
  plate-planner render -o itinerary.html          Render the last itinerary as HTML
  plate-planner config set-key tripadvisor        Store a TripAdvisor key (read from stdin)
  plate-planner completions zsh                   Generate zsh completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Plan a restaurant itinerary for your trip and check what reviewers say",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Itinerary store file (overrides PLATE_PLANNER_STORE)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an itinerary without the interactive planner
    #[command(group(ArgGroup::new("source").required(true).multiple(true).args(["from_text", "answers"])))]
    Plan {
        /// Describe the trip in your own words
        #[arg(long, value_name = "TEXT")]
        from_text: Option<String>,
        /// JSON file with answers keyed by question (destination, dates, ...)
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,
        /// Also write the itinerary as an HTML page
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },
    /// Extract restaurants from an itinerary Markdown file into the store
    Extract {
        /// Markdown file to read
        file: PathBuf,
    },
    /// List stored restaurants with display names
    Places {
        /// Name normalization policy
        #[arg(long, value_name = "POLICY")]
        policy: Option<NamePolicy>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Look up reviews for stored restaurants
    Reviews {
        /// Name normalization policy
        #[arg(long, value_name = "POLICY")]
        policy: Option<NamePolicy>,
        /// Maximum lookups in flight
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },
    /// Render itinerary Markdown as an HTML page
    Render {
        /// Markdown file (default: last generated itinerary)
        input: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show config paths, model, and API key status
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Store an API key in the config directory (reads stdin when KEY is omitted)
    SetKey {
        #[arg(value_enum)]
        provider: Provider,
        key: Option<String>,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// The interactive planner owns the terminal.
    pub fn is_tui(&self) -> bool {
        self.command.is_none()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn plan_requires_a_source() {
        assert!(Args::try_parse_from(["plate-planner", "plan"]).is_err());
        let args =
            Args::try_parse_from(["plate-planner", "plan", "--from-text", "Austin for 3 days"])
                .unwrap();
        assert!(matches!(args.command, Some(Commands::Plan { .. })));
    }

    #[test]
    fn policy_and_global_flags() {
        let args = Args::try_parse_from([
            "plate-planner",
            "places",
            "--policy",
            "meal-labeled",
            "--store",
            "/tmp/r.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.log_level(), "debug");
        assert_eq!(args.store, Some(PathBuf::from("/tmp/r.json")));
        match args.command {
            Some(Commands::Places { policy, json }) => {
                assert_eq!(policy, Some(NamePolicy::MealLabeled));
                assert!(!json);
            }
            _ => panic!("expected places"),
        }
        assert!(Args::try_parse_from(["plate-planner", "places", "--policy", "bogus"]).is_err());
    }

    #[test]
    fn set_key_provider() {
        let args =
            Args::try_parse_from(["plate-planner", "config", "set-key", "tripadvisor", "abc"])
                .unwrap();
        match args.command {
            Some(Commands::Config {
                action: Some(ConfigAction::SetKey { provider, key }),
            }) => {
                assert_eq!(provider, Provider::Tripadvisor);
                assert_eq!(key.as_deref(), Some("abc"));
            }
            _ => panic!("expected config set-key"),
        }
    }

    #[test]
    fn no_subcommand_is_tui() {
        let args = Args::try_parse_from(["plate-planner", "-q"]).unwrap();
        assert!(args.is_tui());
        assert_eq!(args.log_level(), "error");
    }
}
