//! Custom vocabulary matched over engine tokens.
//!
//! A vocabulary phrase is split on whitespace into lower-cased terms; a hit is
//! any run of tokens whose lower-cased texts equal those terms. Hits carry
//! token offsets, ready for [`SpanConflictResolver`](crate::resolve::SpanConflictResolver).

use lexner_core::{EntityRecord, Span, Token};
use log::debug;

use crate::error::{Error, Result};

/// One registered phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Phrase as registered
    pub phrase: String,
    /// Category reported for hits
    pub category: String,
    terms: Vec<String>,
}

impl VocabularyEntry {
    /// Lower-cased terms the phrase matches on.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Ordered list of `(phrase, category)` entries.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    /// Empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `phrase` under `category`.
    ///
    /// Fails if the phrase has no term or the category is blank.
    pub fn add(&mut self, phrase: &str, category: &str) -> Result<()> {
        let terms: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Err(Error::invalid_input("vocabulary phrase must not be empty"));
        }
        if category.trim().is_empty() {
            return Err(Error::invalid_input("vocabulary category must not be empty"));
        }
        self.entries.push(VocabularyEntry {
            phrase: phrase.trim().to_string(),
            category: category.to_string(),
            terms,
        });
        Ok(())
    }

    /// Entries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Finds vocabulary phrases in a token stream.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyMatcher<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> VocabularyMatcher<'v> {
    /// Matcher over `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Every hit as a candidate record in token offsets, ordered by
    /// `(start, end)`; entries registered earlier come first on ties.
    #[must_use]
    pub fn matches(&self, tokens: &[Token]) -> Vec<EntityRecord> {
        if self.vocabulary.is_empty() || tokens.is_empty() {
            return Vec::new();
        }
        let lowered: Vec<String> = tokens.iter().map(Token::lower).collect();

        let mut hits = Vec::new();
        for start in 0..tokens.len() {
            for entry in self.vocabulary.iter() {
                let end = start + entry.terms.len();
                if end > tokens.len() || lowered[start..end] != entry.terms[..] {
                    continue;
                }
                let text = tokens[start..end]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                debug!(
                    "Vocabulary candidate {{'{}', key:{}, at({}:{})}}",
                    text, entry.category, start, end
                );
                hits.push(EntityRecord::new(
                    text,
                    entry.category.clone(),
                    Span { start, end },
                ));
            }
        }
        hits.sort_by_key(|r| (r.span.start, r.span.end));
        hits
    }
}
