//! lexner - dictionary and regex entity matching CLI
//!
//! # Usage
//!
//! ```bash
//! # Match against a one-off dictionary
//! lexner check --entities cars.json "a Focus is a type of car"
//!
//! # Engine path with custom vocabulary
//! lexner recognize --vocab vocab.json "Meet me in New York"
//!
//! # Downstream terms
//! lexner tokenize --filter-entities "Call John at 5"
//!
//! # Populate/delete/check against one live store
//! lexner batch requests.jsonl
//! ```

use std::process::ExitCode;

use clap::Parser;

use lexner::cli::commands::{cmd_batch, cmd_check, cmd_recognize, cmd_tokenize};
use lexner::cli::utils::{load_config, log_level};
use lexner::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(cli.verbose)))
        .format_timestamp_secs()
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        log::debug!("Config: {:?}", config);
        match cli.command {
            Commands::Check(args) => cmd_check(args, &config),
            Commands::Recognize(args) => cmd_recognize(args, &config),
            Commands::Tokenize(args) => cmd_tokenize(args, &config),
            Commands::Batch(args) => cmd_batch(args, &config),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
