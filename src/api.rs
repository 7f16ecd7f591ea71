//! Request and response types for a service wrapper.
//!
//! A transport layer (HTTP, JSON lines, ...) only has to deserialize these and
//! hand them to [`EntityFinder`](crate::EntityFinder).

use serde::{Deserialize, Serialize};

use lexner_core::EntityCheckResult;

use crate::store::{LiteralUpdates, RegexUpdates};

/// Add literal values and regex categories to the live store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateRequest {
    /// Literal values keyed by category
    pub entities: LiteralUpdates,
    /// Regex patterns keyed by category
    pub regex_entities: RegexUpdates,
}

/// Remove categories (empty list) or listed values from the live store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    /// Values to remove keyed by category
    pub entities: LiteralUpdates,
}

/// Match a conversation.
///
/// When either map is present a one-off store is built from them and the
/// live store is not consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Text to match
    pub conversation: String,
    /// One-off literal values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<LiteralUpdates>,
    /// One-off regex patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_entities: Option<RegexUpdates>,
}

impl CheckRequest {
    /// Request against the live store.
    #[must_use]
    pub fn new(conversation: impl Into<String>) -> Self {
        Self {
            conversation: conversation.into(),
            ..Self::default()
        }
    }

    /// True when the request carries its own dictionaries.
    #[must_use]
    pub fn is_one_off(&self) -> bool {
        self.entities.is_some() || self.regex_entities.is_some()
    }
}

/// Result of a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Text that was matched
    pub conversation: String,
    /// Matched surface text -> categories
    pub entities: EntityCheckResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_defaults() {
        let req: PopulateRequest = serde_json::from_str(r#"{"entities":{"cars":["Focus"]}}"#).unwrap();
        assert_eq!(req.entities["cars"], vec!["Focus"]);
        assert!(req.regex_entities.is_empty());
    }

    #[test]
    fn test_check_one_off() {
        let live: CheckRequest = serde_json::from_str(r#"{"conversation":"hi"}"#).unwrap();
        assert!(!live.is_one_off());
        let one_off: CheckRequest =
            serde_json::from_str(r#"{"conversation":"hi","regex_entities":{"x":"h."}}"#).unwrap();
        assert!(one_off.is_one_off());
    }

    #[test]
    fn test_check_requires_conversation() {
        assert!(serde_json::from_str::<CheckRequest>(r#"{"entities":{}}"#).is_err());
    }

    #[test]
    fn test_response_shape() {
        let mut entities = EntityCheckResult::new();
        entities.insert("Focus", "cars");
        let resp = CheckResponse {
            conversation: "a Focus".into(),
            entities,
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"conversation":"a Focus","entities":{"Focus":["cars"]}}"#
        );
    }
}
