//! Merging vocabulary candidates into a document's entity spans.
//!
//! A candidate `C` is checked against every existing record `E` that overlaps
//! it (`E.start < C.end && C.start < E.end`):
//!
//! ```text
//! existing:  [──────── E (10) ────────]        [─ E2 (2) ─]
//! candidate:       [─ C (4) ─]
//!
//! len(E) > len(C)   → E stays, C is discarded
//! len(E) <= len(C)  → E is removed (ties go to the candidate)
//! ```
//!
//! Each overlapping `E` is decided on its own, so a shorter `E` is removed
//! even when another, longer `E` ends up discarding `C`. `C` is inserted only
//! if no overlapping record beat it. The result never holds two overlapping
//! records.

use lexner_core::{DocumentEntitySet, EntityRecord, Token};
use log::debug;

use crate::backends::{Vocabulary, VocabularyMatcher};

/// Outcome of one candidate/existing clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clash {
    /// The existing record is strictly longer.
    ExistingWins,
    /// Equal or longer candidate.
    CandidateWins,
}

impl Clash {
    fn decide(existing: &EntityRecord, candidate: &EntityRecord) -> Self {
        if existing.len() > candidate.len() {
            Clash::ExistingWins
        } else {
            Clash::CandidateWins
        }
    }
}

/// Resolves overlaps between a candidate record and a [`DocumentEntitySet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanConflictResolver;

impl SpanConflictResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Merge `candidate` into `existing` and return the new set.
    ///
    /// A degenerate candidate span leaves the set as it was.
    ///
    /// ```rust
    /// use lexner::SpanConflictResolver;
    /// use lexner_core::{DocumentEntitySet, EntityRecord, Span};
    ///
    /// let place = EntityRecord::new("London", "GPE", Span { start: 10, end: 16 });
    /// let custom = EntityRecord::new("London", "@city", Span { start: 10, end: 16 });
    /// let doc = DocumentEntitySet::from_records(vec![place]).unwrap();
    ///
    /// let merged = SpanConflictResolver::new().resolve(custom, doc);
    /// assert_eq!(merged.records()[0].label, "@city");
    /// ```
    #[must_use]
    pub fn resolve(&self, candidate: EntityRecord, existing: DocumentEntitySet) -> DocumentEntitySet {
        if candidate.is_empty() {
            debug!("Ignoring candidate with empty span {}", candidate);
            return existing;
        }

        let mut set = existing;
        let mut add_candidate = true;
        set.retain(|record| {
            if !record.overlaps(&candidate) {
                return true;
            }
            let clash = Clash::decide(record, &candidate);
            debug!(
                "Candidate {} clashes with existing {}: {:?}",
                candidate, record, clash
            );
            match clash {
                Clash::ExistingWins => {
                    add_candidate = false;
                    true
                }
                Clash::CandidateWins => false,
            }
        });

        if add_candidate {
            // Every overlapping record was removed above, so this cannot clash.
            if let Err(rejected) = set.try_insert(candidate) {
                debug!("Candidate {} could not be inserted", rejected);
            }
        }
        set
    }

    /// Fold `candidates` into `existing`, in order.
    #[must_use]
    pub fn resolve_all(
        &self,
        candidates: impl IntoIterator<Item = EntityRecord>,
        existing: DocumentEntitySet,
    ) -> DocumentEntitySet {
        candidates
            .into_iter()
            .fold(existing, |set, candidate| self.resolve(candidate, set))
    }
}

/// Match `vocabulary` over `tokens` and merge every hit into `existing`.
///
/// Hits are applied in `(start, end)` order. Spans are token offsets.
#[must_use]
pub fn find_entities_in_doc(
    tokens: &[Token],
    existing: DocumentEntitySet,
    vocabulary: &Vocabulary,
) -> DocumentEntitySet {
    let hits = VocabularyMatcher::new(vocabulary).matches(tokens);
    SpanConflictResolver::new().resolve_all(hits, existing)
}
