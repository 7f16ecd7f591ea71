//! Literal-over-regex priority.
//!
//! Hits are grouped by their exact surface text. Within a group:
//!
//! | Hits present | Kept |
//! |--------------|------|
//! | literal only | every literal category |
//! | regex only | every regex category |
//! | both | literal categories; regex hits dropped |
//!
//! Regex exists to catch values nobody listed, so a listed value always
//! decides its own categories.

use std::collections::BTreeMap;

use lexner_core::{EntityCheckResult, MatchHit, SourceKind};
use log::debug;

/// Outcome for one surface-text group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// Literal hits present: keep only those.
    LiteralOnly,
    /// No literal hit: keep everything.
    KeepAll,
}

impl Resolution {
    fn for_group(hits: &[MatchHit]) -> Self {
        if hits.iter().any(|h| h.source == SourceKind::Literal) {
            Resolution::LiteralOnly
        } else {
            Resolution::KeepAll
        }
    }

    fn keeps(self, hit: &MatchHit) -> bool {
        match self {
            Resolution::LiteralOnly => hit.source == SourceKind::Literal,
            Resolution::KeepAll => true,
        }
    }
}

/// Merges literal and regex hits into an [`EntityCheckResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityMerger;

impl PriorityMerger {
    /// Create a merger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Merge hits from any number of matchers.
    ///
    /// Surface texts are compared exactly, so `"Coffee"` and `"coffee"` are
    /// separate groups. An input with no hit yields an empty result.
    #[must_use]
    pub fn merge(&self, hits: impl IntoIterator<Item = MatchHit>) -> EntityCheckResult {
        let mut groups: BTreeMap<String, Vec<MatchHit>> = BTreeMap::new();
        for hit in hits {
            groups.entry(hit.text.clone()).or_default().push(hit);
        }

        let mut result = EntityCheckResult::new();
        for (text, group) in groups {
            let resolution = Resolution::for_group(&group);
            for hit in group {
                if resolution.keeps(&hit) {
                    result.insert(hit.text, hit.category);
                } else {
                    debug!(
                        "Regex category '{}' dropped for '{}': literal match present",
                        hit.category, text
                    );
                }
            }
        }
        result
    }
}
