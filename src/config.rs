//! Matching and tokenization configuration.
//!
//! All fields have defaults, so an empty TOML file is a valid config:
//!
//! ```toml
//! max_phrase_words = 4
//! regex_anchor = "full"
//!
//! [tokenize]
//! filter_entities = true
//! stoplist = "large"
//! ```

use serde::{Deserialize, Serialize};

/// How a regex category pattern is anchored against a word.
///
/// Anchors apply to the word after edge punctuation is stripped (`A213` in
/// `"A213?"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegexAnchor {
    /// The pattern must match the whole word.
    #[default]
    Full,
    /// The pattern is anchored at the start of the word only; end anchoring is
    /// left to the pattern's own `$`.
    Start,
}

/// Which stopword list downstream tokenization removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoplistSize {
    /// Large list minus question words (what, where, ...).
    #[default]
    Small,
    /// Full stopword list.
    Large,
}

/// Downstream tokenization settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizeConfig {
    /// Replace numbers and person names with `NUM` / `PERSON` placeholders.
    pub filter_entities: bool,
    /// Stopword list to apply.
    pub stoplist: StoplistSize,
}

/// Configuration for an [`EntityFinder`](crate::EntityFinder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Longest candidate phrase (in words) tried against literal values.
    /// `None` tries every phrase of the message.
    pub max_phrase_words: Option<usize>,
    /// Anchoring applied to regex category patterns.
    pub regex_anchor: RegexAnchor,
    /// Downstream tokenization settings.
    pub tokenize: TokenizeConfig,
}

impl FinderConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap candidate phrase length.
    #[must_use]
    pub fn max_phrase_words(mut self, max: usize) -> Self {
        self.max_phrase_words = Some(max);
        self
    }

    /// Set regex anchoring.
    #[must_use]
    pub fn regex_anchor(mut self, anchor: RegexAnchor) -> Self {
        self.regex_anchor = anchor;
        self
    }

    /// Set downstream tokenization settings.
    #[must_use]
    pub fn tokenize(mut self, tokenize: TokenizeConfig) -> Self {
        self.tokenize = tokenize;
        self
    }
}
