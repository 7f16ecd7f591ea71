//! Utility functions for CLI commands

use is_terminal::IsTerminal;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};

use crate::FinderConfig;

/// Get input text from positional args, or stdin when it is piped
pub fn get_input_text(positional: &[String]) -> Result<String, String> {
    if !positional.is_empty() {
        return Ok(positional.join(" "));
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format_error("read stdin", &e.to_string()))?;
        if !buf.trim().is_empty() {
            return Ok(buf.trim_end().to_string());
        }
    }

    Err("No input text provided. Pass TEXT or pipe via stdin".to_string())
}

/// Read a file with consistent error handling
pub fn read_input_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format_error("read file", &format!("{}: {}", path, e)))
}

/// Read and parse a JSON file
pub fn read_json_file<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let content = read_input_file(path)?;
    serde_json::from_str(&content)
        .map_err(|e| format_error("parse JSON", &format!("{}: {}", path, e)))
}

/// Load a TOML config, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<FinderConfig, String> {
    match path {
        Some(path) => {
            let content = read_input_file(path)?;
            toml::from_str(&content)
                .map_err(|e| format_error("parse config", &format!("{}: {}", path, e)))
        }
        None => Ok(FinderConfig::default()),
    }
}

/// Default log filter for a `-v` count
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Format error message consistently
pub fn format_error(operation: &str, details: &str) -> String {
    format!("Failed to {}: {}", operation, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RegexAnchor, StoplistSize};
    use std::io::Write;

    #[test]
    fn test_positional_joined() {
        let args = vec!["a".to_string(), "Focus".to_string()];
        assert_eq!(get_input_text(&args).unwrap(), "a Focus");
    }

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "regex_anchor = \"start\"\n[tokenize]\nstoplist = \"large\"").unwrap();
        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.regex_anchor, RegexAnchor::Start);
        assert_eq!(config.tokenize.stoplist, StoplistSize::Large);
        assert_eq!(load_config(None).unwrap(), FinderConfig::default());
    }

    #[test]
    fn test_load_config_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "regex_anchor = \"middle\"").unwrap();
        let err = load_config(file.path().to_str()).unwrap_err();
        assert!(err.starts_with("Failed to parse config"));
        assert!(load_config(Some("/nonexistent/lexner.toml"))
            .unwrap_err()
            .starts_with("Failed to read file"));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "debug");
        assert_eq!(log_level(5), "trace");
    }
}
