//! # lexner
//!
//! Dictionary and regex entity matching for short conversational text.
//!
//! - **Dictionaries**: literal values grouped by category, matched
//!   case-insensitively on word boundaries, longest match first
//! - **Regex categories**: one pattern per category, matched case-sensitively
//!   against single words
//! - **Priority**: a literal match always beats a regex match on the same text
//! - **Engine merge**: custom vocabulary merged into a statistical engine's
//!   entity spans without overlaps
//!
//! ## Quick Start
//!
//! ```rust
//! use lexner::{EntityFinder, LiteralUpdates, RegexUpdates};
//!
//! let finder = EntityFinder::new();
//!
//! let mut literals = LiteralUpdates::new();
//! literals.insert("CakeSize".into(), vec!["Large".into(), "Tiny".into()]);
//! literals.insert("Drinks".into(), vec!["Beer".into(), "Diet Coke".into()]);
//! let mut regexes = RegexUpdates::new();
//! regexes.insert("CakeTypeRegex".into(), "^[Cc].+$".into());
//! finder.populate_entities(&literals, &regexes).unwrap();
//!
//! let result = finder.check_entities("I want a Large cake and some beer", None);
//! assert_eq!(result.len(), 3);
//! assert!(result.categories("beer").unwrap().contains("Drinks"));
//! assert!(result.categories("cake").unwrap().contains("CakeTypeRegex"));
//! ```
//!
//! ## Two paths
//!
//! | Path | Entry point | Input | Output |
//! |------|-------------|-------|--------|
//! | Dictionary | [`EntityFinder::check_entities`] | text | [`EntityCheckResult`] |
//! | Engine | [`EntityFinder::recognize`] | text | [`NamedEntity`] list |
//! | Engine (raw) | [`find_entities_in_doc`] | tokens + spans | [`DocumentEntitySet`] |
//!
//! ## Feature Flags
//!
//! - `fast-lock` (default): `parking_lot` locks instead of `std::sync`
//! - `cli` (default): the `lexner` binary

#![warn(missing_docs)]

pub mod api;
pub mod backends;
pub mod categories;
pub mod config;
pub mod engine;
mod error;
pub mod finder;
pub mod offset;
pub mod resolve;
pub mod store;
pub mod sync;
pub mod tokenize;
pub mod words;

#[cfg(feature = "cli")]
pub mod cli;

pub use lexner_core::{
    DocumentEntitySet, EntityCheckResult, EntityRecord, MatchHit, SourceKind, Span, Token,
};

pub use api::{CheckRequest, CheckResponse, DeleteRequest, PopulateRequest};
pub use backends::{
    Matcher, PlainValueMatcher, PriorityMerger, RegexMatcher, Vocabulary, VocabularyMatcher,
};
pub use categories::{system_category, NamedEntity};
pub use config::{FinderConfig, RegexAnchor, StoplistSize, TokenizeConfig};
pub use engine::{AnalyzedDoc, BasicEngine, MockEngine, StatisticalEngine};
pub use error::{Error, Result};
pub use finder::EntityFinder;
pub use offset::SpanConverter;
pub use resolve::{find_entities_in_doc, SpanConflictResolver};
pub use store::{EntityCategory, EntityStore, LiteralUpdates, RegexUpdates, StoreSnapshot};
pub use tokenize::tokenize;
pub use words::{split_message, split_words, Word};
