//! Output formatting utilities for CLI commands

use is_terminal::IsTerminal;
use std::io::{self, Write};

use crate::{EntityCheckResult, NamedEntity};

/// Write output to stdout
pub fn write_output(content: &str) -> Result<(), String> {
    let mut stdout = io::stdout();
    stdout
        .write_all(content.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("Failed to write to stdout: {}", e))
}

/// True when stdout is a terminal and output may be colored
pub fn use_color() -> bool {
    io::stdout().is_terminal()
}

/// Colorize text with ANSI escape codes when `enabled`
pub fn color(code: &str, text: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Get color code for a category
pub fn category_color(category: &str) -> &'static str {
    match category {
        "sys.person" => "1;34",
        "sys.organization" => "1;32",
        "sys.places" => "1;33",
        "sys.date" | "sys.time" => "1;35",
        "sys.money" | "sys.percent" | "sys.number" => "1;36",
        c if c.starts_with('@') => "36",
        _ => "1;37",
    }
}

/// One line per matched text: `text: cat1, cat2`
pub fn format_check_human(result: &EntityCheckResult, colored: bool) -> String {
    if result.is_empty() {
        return "(no entities)\n".to_string();
    }
    let mut out = String::new();
    for (text, categories) in result.iter() {
        let cats: Vec<String> = categories
            .iter()
            .map(|c| color(category_color(c), c, colored))
            .collect();
        out.push_str(&format!("{}: {}\n", text, cats.join(", ")));
    }
    out
}

/// One line per entity: `start..end  category  value`
pub fn format_entities_human(entities: &[NamedEntity], colored: bool) -> String {
    if entities.is_empty() {
        return "(no entities)\n".to_string();
    }
    let mut out = String::new();
    for e in entities {
        out.push_str(&format!(
            "{:>4}..{:<4} {} {}\n",
            e.start,
            e.end,
            color(category_color(&e.category), &e.category, colored),
            e.value
        ));
    }
    out
}
