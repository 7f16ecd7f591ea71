//! Matching backends.
//!
//! Each dictionary backend implements [`Matcher`] so the finder can run them
//! side by side over the same word split and snapshot.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Dictionary path (check_entities)                         │
//! │                                                          │
//! │   split_words ─┬─► PlainValueMatcher ─┐                  │
//! │                │   (case-insensitive, │                  │
//! │                │    longest wins)     ├─► PriorityMerger │
//! │                └─► RegexMatcher ──────┘   (literal beats │
//! │                    (case-sensitive,       regex)         │
//! │                     one word)                            │
//! ├──────────────────────────────────────────────────────────┤
//! │ Engine path (find_entities_in_doc / recognize)           │
//! │                                                          │
//! │   tokens ─► VocabularyMatcher ─► SpanConflictResolver    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Backend Comparison
//!
//! | Backend | Input | Case | Output |
//! |---------|-------|------|--------|
//! | `PlainValueMatcher` | words | insensitive | literal hits |
//! | `RegexMatcher` | single words | sensitive | regex hits |
//! | `VocabularyMatcher` | engine tokens | insensitive | token-span records |

pub mod lexicon;
pub mod priority;
pub mod regex;
pub mod vocabulary;

pub use lexicon::PlainValueMatcher;
pub use priority::PriorityMerger;
pub use self::regex::RegexMatcher;
pub use vocabulary::{Vocabulary, VocabularyMatcher};

use lexner_core::MatchHit;

use crate::store::StoreSnapshot;
use crate::words::Word;

/// A dictionary backend run by the dictionary path.
pub trait Matcher: Send + Sync {
    /// Find hits for `words` (split from `text`) against `snapshot`.
    fn find(&self, text: &str, words: &[Word<'_>], snapshot: &StoreSnapshot) -> Vec<MatchHit>;

    /// Short backend name used in logs.
    fn name(&self) -> &'static str;
}
