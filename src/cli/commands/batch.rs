//! Batch command - JSON-lines requests against one live store
//!
//! Each input line is one request:
//!
//! ```text
//! {"op": "populate", "entities": {"cars": ["Focus"]}, "regex_entities": {}}
//! {"op": "check", "conversation": "a Focus"}
//! {"op": "delete", "entities": {"cars": []}}
//! ```
//!
//! Each produces one output line: `{"ok": true}`, a check response, or
//! `{"error": "...", "line": N}`. A failing request does not stop the batch.

use clap::Parser;
use serde::Deserialize;
use serde_json::json;

use super::super::output::write_output;
use super::super::utils::{format_error, read_input_file};

use crate::{CheckRequest, DeleteRequest, EntityFinder, FinderConfig, PopulateRequest};

/// Run JSON-lines requests against one live store
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// JSON-lines request file ("-" for stdin)
    #[arg(value_name = "PATH")]
    pub file: String,
}

/// One batch request.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum BatchRequest {
    Populate(PopulateRequest),
    Delete(DeleteRequest),
    Check(CheckRequest),
}

/// Run every request in `input` against `finder`, one output line each
pub fn run_batch(input: &str, finder: &EntityFinder) -> Vec<String> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let outcome = serde_json::from_str::<BatchRequest>(line)
                .map_err(crate::Error::from)
                .and_then(|request| match request {
                    BatchRequest::Populate(req) => finder.populate(&req).map(|_| json!({ "ok": true })),
                    BatchRequest::Delete(req) => finder.delete(&req).map(|_| json!({ "ok": true })),
                    BatchRequest::Check(req) => finder
                        .check(&req)
                        .and_then(|resp| serde_json::to_value(resp).map_err(crate::Error::from)),
                });
            match outcome {
                Ok(value) => value.to_string(),
                Err(e) => json!({ "error": e.to_string(), "line": idx + 1 }).to_string(),
            }
        })
        .collect()
}

/// `lexner batch`
pub fn cmd_batch(args: BatchArgs, config: &FinderConfig) -> Result<(), String> {
    let input = if args.file == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .map_err(|e| format_error("read stdin", &e.to_string()))?;
        buf
    } else {
        read_input_file(&args.file)?
    };

    let finder = EntityFinder::with_config(config.clone());
    let mut out = String::new();
    for line in run_batch(&input, &finder) {
        out.push_str(&line);
        out.push('\n');
    }
    write_output(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_check_delete() {
        let input = r#"
{"op": "populate", "entities": {"cars": ["Focus"]}}
{"op": "check", "conversation": "a Focus"}
{"op": "delete", "entities": {"cars": []}}
{"op": "check", "conversation": "a Focus"}
"#;
        let out = run_batch(input, &EntityFinder::new());
        assert_eq!(
            out,
            vec![
                r#"{"ok":true}"#,
                r#"{"conversation":"a Focus","entities":{"Focus":["cars"]}}"#,
                r#"{"ok":true}"#,
                r#"{"conversation":"a Focus","entities":{}}"#,
            ]
        );
    }

    #[test]
    fn test_bad_regex_reports_and_continues() {
        let input = r#"{"op": "populate", "regex_entities": {"bad": "[a"}}
{"op": "check", "conversation": "a", "regex_entities": {"x": "a"}}
not json"#;
        let out = run_batch(input, &EntityFinder::new());
        assert_eq!(out.len(), 3);
        let first: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
        assert!(first["error"].as_str().unwrap().contains("bad"));
        assert_eq!(first["line"], 1);
        assert_eq!(out[1], r#"{"conversation":"a","entities":{"a":["x"]}}"#);
        let third: serde_json::Value = serde_json::from_str(&out[2]).unwrap();
        assert_eq!(third["line"], 3);
    }
}
