//! Check command - dictionary and regex matching with a one-off store

use clap::Parser;

use super::super::output::{format_check_human, use_color, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::{format_error, get_input_text, read_json_file};

use crate::{CheckResponse, EntityFinder, FinderConfig, LiteralUpdates, RegexUpdates};

/// Match text against literal dictionaries and regex categories
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON file of literal values: {"category": ["value", ...]}
    #[arg(short, long, value_name = "PATH")]
    pub entities: Option<String>,

    /// JSON file of regex categories: {"category": "pattern"}
    #[arg(short, long, value_name = "PATH")]
    pub regex: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Text to match (stdin if omitted)
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

/// Run the check and render the result
pub fn run_check(args: &CheckArgs, config: &FinderConfig, colored: bool) -> Result<String, String> {
    let text = get_input_text(&args.text)?;
    let literals: LiteralUpdates = match &args.entities {
        Some(path) => read_json_file(path)?,
        None => LiteralUpdates::new(),
    };
    let regexes: RegexUpdates = match &args.regex {
        Some(path) => read_json_file(path)?,
        None => RegexUpdates::new(),
    };

    let finder = EntityFinder::with_config(config.clone());
    let snapshot = finder
        .one_off_snapshot(&literals, &regexes)
        .map_err(|e| e.to_string())?;
    let entities = finder.check_entities(&text, Some(&snapshot));

    match args.format {
        OutputFormat::Human => Ok(format_check_human(&entities, colored)),
        OutputFormat::Json => {
            let response = CheckResponse {
                conversation: text,
                entities,
            };
            serde_json::to_string_pretty(&response)
                .map(|json| json + "\n")
                .map_err(|e| format_error("serialize result", &e.to_string()))
        }
    }
}

/// `lexner check`
pub fn cmd_check(args: CheckArgs, config: &FinderConfig) -> Result<(), String> {
    let out = run_check(&args, config, use_color())?;
    write_output(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn json_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn args(entities: Option<&tempfile::NamedTempFile>, regex: Option<&tempfile::NamedTempFile>, format: OutputFormat, text: &str) -> CheckArgs {
        CheckArgs {
            entities: entities.map(|f| f.path().to_string_lossy().into_owned()),
            regex: regex.map(|f| f.path().to_string_lossy().into_owned()),
            format,
            text: vec![text.to_string()],
        }
    }

    #[test]
    fn test_human_output() {
        let entities = json_file(r#"{"cars": ["Fiesta", "Focus", "Golf"]}"#);
        let out = run_check(
            &args(Some(&entities), None, OutputFormat::Human, "a Focus is a type of car"),
            &FinderConfig::default(),
            false,
        )
        .unwrap();
        assert_eq!(out, "Focus: cars\n");
    }

    #[test]
    fn test_json_output() {
        let regex = json_file(r#"{"ralarms": "[A]\\d{3}$"}"#);
        let out = run_check(
            &args(None, Some(&regex), OutputFormat::Json, "Alarm number A213"),
            &FinderConfig::default(),
            false,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["entities"]["A213"][0], "ralarms");
        assert_eq!(value["conversation"], "Alarm number A213");
    }

    #[test]
    fn test_bad_regex_is_an_error() {
        let regex = json_file(r#"{"bad": "[a"}"#);
        let err = run_check(
            &args(None, Some(&regex), OutputFormat::Human, "a"),
            &FinderConfig::default(),
            false,
        )
        .unwrap_err();
        assert!(err.contains("bad"));
    }
}
