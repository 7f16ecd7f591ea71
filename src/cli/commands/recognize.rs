//! Recognize command - engine entities plus custom vocabulary

use std::collections::BTreeMap;

use clap::Parser;

use super::super::output::{format_entities_human, use_color, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::{format_error, get_input_text, read_json_file};

use crate::{EntityFinder, FinderConfig};

/// Recognize entities with the engine and custom vocabulary
#[derive(Parser, Debug)]
pub struct RecognizeArgs {
    /// JSON file of vocabulary: {"category": ["phrase", ...]}
    #[arg(long, value_name = "PATH")]
    pub vocab: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Text to analyse (stdin if omitted)
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

/// Run recognition and render the entities
pub fn run_recognize(args: &RecognizeArgs, config: &FinderConfig, colored: bool) -> Result<String, String> {
    let text = get_input_text(&args.text)?;
    let finder = EntityFinder::with_config(config.clone());

    if let Some(path) = &args.vocab {
        let vocab: BTreeMap<String, Vec<String>> = read_json_file(path)?;
        for (category, phrases) in &vocab {
            for phrase in phrases {
                finder
                    .add_vocabulary(phrase, category)
                    .map_err(|e| format_error("load vocabulary", &e.to_string()))?;
            }
        }
    }

    let entities = finder.recognize(&text).map_err(|e| e.to_string())?;
    match args.format {
        OutputFormat::Human => Ok(format_entities_human(&entities, colored)),
        OutputFormat::Json => serde_json::to_string_pretty(&entities)
            .map(|json| json + "\n")
            .map_err(|e| format_error("serialize entities", &e.to_string())),
    }
}

/// `lexner recognize`
pub fn cmd_recognize(args: RecognizeArgs, config: &FinderConfig) -> Result<(), String> {
    let out = run_recognize(&args, config, use_color())?;
    write_output(&out)
}
