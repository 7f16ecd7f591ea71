//! Regex category matching.
//!
//! Patterns run against one word at a time, anchored when the category was
//! compiled (see [`RegexAnchor`](crate::config::RegexAnchor)). Words come from
//! [`split_words`](crate::words::split_words), so edge punctuation is already
//! gone: `#\w+` never matches `#rust`, and `\$\d+` never matches `$5`.
//!
//! Matching is case-sensitive: a pattern catches values the dictionaries do
//! not list, and it must not quietly match more than it says.

use lexner_core::MatchHit;
use log::debug;

use super::Matcher;
use crate::store::StoreSnapshot;
use crate::words::Word;

/// Per-word matcher for regex categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexMatcher;

impl RegexMatcher {
    /// Create a matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for RegexMatcher {
    fn find(&self, _text: &str, words: &[Word<'_>], snapshot: &StoreSnapshot) -> Vec<MatchHit> {
        let mut hits = Vec::new();
        for (category, compiled) in snapshot.regex_categories() {
            for word in words.iter().filter(|w| compiled.is_match(w.text)) {
                debug!("Regex category '{}' matched '{}'", category, word.text);
                hits.push(MatchHit::regex(word.text, category));
            }
        }
        hits
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
