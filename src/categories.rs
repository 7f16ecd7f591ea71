//! Mapping engine labels to reported categories.
//!
//! | Engine label | Category |
//! |--------------|----------|
//! | `PERSON` | `sys.person` |
//! | `GPE`, `LOC` | `sys.places` |
//! | `DATE` | `sys.date` |
//! | `TIME` | `sys.time` |
//! | `ORG` | `sys.organization` |
//! | `MONEY` | `sys.money` |
//! | `PERCENT` | `sys.percent` |
//! | `CARDINAL` | `sys.number` |
//! | `@anything` | reported verbatim (custom vocabulary) |
//!
//! Other labels are uncategorised and not reported.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix marking custom vocabulary categories.
pub const CUSTOM_PREFIX: char = '@';

/// A recognized entity in character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Surface text
    pub value: String,
    /// Reported category (`sys.*` or `@custom`)
    pub category: String,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

impl fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'{}', category:{}, at({}:{})}}",
            self.value, self.category, self.start, self.end
        )
    }
}

/// Category reported for an engine label, or `None` if it is uncategorised.
#[must_use]
pub fn system_category(label: &str) -> Option<String> {
    if label.starts_with(CUSTOM_PREFIX) {
        return Some(label.to_string());
    }
    let category = match label {
        "PERSON" => "sys.person",
        "GPE" | "LOC" => "sys.places",
        "DATE" => "sys.date",
        "TIME" => "sys.time",
        "ORG" => "sys.organization",
        "MONEY" => "sys.money",
        "PERCENT" => "sys.percent",
        "CARDINAL" => "sys.number",
        _ => return None,
    };
    Some(category.to_string())
}

/// Custom category name with the `@` prefix added if missing.
#[must_use]
pub fn custom_category(name: &str) -> String {
    let name = name.trim();
    if name.starts_with(CUSTOM_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", CUSTOM_PREFIX, name)
    }
}
