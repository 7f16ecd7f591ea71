//! Literal dictionary matching.
//!
//! Every candidate phrase (see [`crate::words`]) is looked up by its
//! lower-cased key in the snapshot's literal index. Overlapping matches are
//! then resolved longest-first:
//!
//! ```text
//! "I want a Diet Coke"
//!           └─Diet Coke─┘  Drinks       (2 words, kept)
//!                └Coke┘    Drinks       (1 word, inside a longer match: dropped)
//! ```
//!
//! A match is only suppressed by a strictly longer overlapping match, so the
//! same phrase found under two categories, or two equal-length phrases that
//! overlap, are all reported. The rule ignores categories.

use std::collections::BTreeSet;

use lexner_core::{MatchHit, Span};
use log::debug;

use super::Matcher;
use crate::store::StoreSnapshot;
use crate::words::{phrase_char_span, phrase_key, phrase_spans, phrase_text, Word};

/// Case-insensitive, word-aligned matcher for literal category values.
#[derive(Debug, Clone, Default)]
pub struct PlainValueMatcher {
    max_phrase_words: Option<usize>,
}

/// One phrase that hit the index, before overlap resolution.
struct Candidate<'s> {
    phrase: Span,
    categories: &'s BTreeSet<String>,
}

impl PlainValueMatcher {
    /// Matcher trying phrases of any length.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap candidate phrase length in words.
    #[must_use]
    pub fn with_max_phrase_words(mut self, max: Option<usize>) -> Self {
        self.max_phrase_words = max;
        self
    }
}

impl Matcher for PlainValueMatcher {
    fn find(&self, text: &str, words: &[Word<'_>], snapshot: &StoreSnapshot) -> Vec<MatchHit> {
        if words.is_empty() || !snapshot.has_literals() {
            return Vec::new();
        }

        // No value is longer than the longest one in the store.
        let longest = snapshot.longest_value_words();
        let cap = self.max_phrase_words.map_or(longest, |m| m.min(longest));

        let mut candidates: Vec<Candidate<'_>> = phrase_spans(words.len(), Some(cap))
            .filter_map(|phrase| {
                snapshot
                    .literal_categories(&phrase_key(words, phrase))
                    .map(|categories| Candidate { phrase, categories })
            })
            .collect();
        // Longest first; the sort is stable so equal lengths stay in text order.
        candidates.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));

        let mut accepted: Vec<Candidate<'_>> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let covering = accepted.iter().find(|a| {
                a.phrase.len() > candidate.phrase.len() && a.phrase.overlaps(&candidate.phrase)
            });
            match covering {
                Some(winner) => debug!(
                    "Literal '{}' at {} suppressed by longer '{}'",
                    phrase_text(text, words, candidate.phrase),
                    phrase_char_span(words, candidate.phrase),
                    phrase_text(text, words, winner.phrase)
                ),
                None => accepted.push(candidate),
            }
        }

        accepted
            .iter()
            .flat_map(|c| {
                let surface = phrase_text(text, words, c.phrase);
                c.categories
                    .iter()
                    .map(move |category| MatchHit::literal(surface, category.as_str()))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "literal"
    }
}
