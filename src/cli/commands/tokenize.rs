//! Tokenize command - downstream terms

use clap::Parser;

use super::super::output::write_output;
use super::super::parser::{OutputFormat, StoplistArg};
use super::super::utils::{format_error, get_input_text};

use crate::{EntityFinder, FinderConfig};

/// Normalise text into downstream terms
#[derive(Parser, Debug)]
pub struct TokenizeArgs {
    /// Replace numbers and person names with placeholders
    #[arg(long)]
    pub filter_entities: bool,

    /// Stopword list (overrides config)
    #[arg(long, value_enum)]
    pub stoplist: Option<StoplistArg>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Text to tokenize (stdin if omitted)
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

/// Tokenize and render the terms
pub fn run_tokenize(args: &TokenizeArgs, config: &FinderConfig) -> Result<String, String> {
    let text = get_input_text(&args.text)?;
    let mut tokenize = config.tokenize;
    tokenize.filter_entities |= args.filter_entities;
    if let Some(stoplist) = args.stoplist {
        tokenize.stoplist = stoplist.into();
    }

    let finder = EntityFinder::with_config(config.clone());
    let terms = finder
        .tokenize_with(&text, tokenize)
        .map_err(|e| e.to_string())?;
    match args.format {
        OutputFormat::Human => Ok(terms.join(" ") + "\n"),
        OutputFormat::Json => serde_json::to_string(&terms)
            .map(|json| json + "\n")
            .map_err(|e| format_error("serialize terms", &e.to_string())),
    }
}

/// `lexner tokenize`
pub fn cmd_tokenize(args: TokenizeArgs, config: &FinderConfig) -> Result<(), String> {
    let out = run_tokenize(&args, config)?;
    write_output(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> TokenizeArgs {
        TokenizeArgs {
            filter_entities: false,
            stoplist: None,
            format: OutputFormat::Human,
            text: vec![text.to_string()],
        }
    }

    #[test]
    fn test_default_small_list() {
        let out = run_tokenize(&args("Where is the nearest bank?"), &FinderConfig::default()).unwrap();
        assert_eq!(out, "where nearest bank\n");
    }

    #[test]
    fn test_flags_override_config() {
        let mut a = args("Where are 3 banks?");
        a.stoplist = Some(StoplistArg::Large);
        a.filter_entities = true;
        a.format = OutputFormat::Json;
        let out = run_tokenize(&a, &FinderConfig::default()).unwrap();
        assert_eq!(out, "[\"banks\"]\n");
    }
}
