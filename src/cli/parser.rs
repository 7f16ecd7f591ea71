//! CLI argument parsing and structure definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use super::commands;

/// Dictionary and regex entity matching
#[derive(Parser, Debug)]
#[command(name = "lexner")]
#[command(
    author,
    version,
    about = "Dictionary and regex entity matching for conversational text",
    long_about = r#"
lexner - dictionary and regex entity matching

PATHS:
  check      literal dictionaries + regex categories, literal beats regex
  recognize  engine tokens + custom vocabulary, merged without overlaps
  tokenize   lemmatised, stopword-filtered terms for downstream models
  batch      JSON-lines populate/delete/check against one live store

EXAMPLES:
  lexner check --entities cars.json "a Focus is a type of car"
  lexner recognize --vocab vocab.json "Meet me in New York"
  lexner tokenize --stoplist large "Where is the nearest bank?"
  lexner batch requests.jsonl
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match text against literal dictionaries and regex categories
    #[command(visible_alias = "c")]
    Check(commands::CheckArgs),

    /// Recognize entities with the engine and custom vocabulary
    #[command(visible_alias = "r")]
    Recognize(commands::RecognizeArgs),

    /// Normalise text into downstream terms
    #[command(visible_alias = "t")]
    Tokenize(commands::TokenizeArgs),

    /// Run JSON-lines requests against one live store
    #[command(visible_alias = "b")]
    Batch(commands::BatchArgs),
}

/// Output format selection for all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON
    Json,
}

/// Stopword list selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoplistArg {
    /// Keeps question words
    Small,
    /// Full list
    Large,
}

impl From<StoplistArg> for crate::StoplistSize {
    fn from(arg: StoplistArg) -> Self {
        match arg {
            StoplistArg::Small => crate::StoplistSize::Small,
            StoplistArg::Large => crate::StoplistSize::Large,
        }
    }
}
