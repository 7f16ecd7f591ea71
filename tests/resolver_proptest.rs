//! Property tests for span conflict resolution.
//!
//! Whatever order candidates arrive in, the merged set must stay a
//! non-overlapping, start-ordered sequence, and a candidate can only lose to a
//! strictly longer record.

use lexner::SpanConflictResolver;
use lexner_core::{DocumentEntitySet, EntityRecord, Span};
use proptest::prelude::*;

fn record(label: &str, start: usize, len: usize) -> EntityRecord {
    EntityRecord::new("x", label, Span {
        start,
        end: start + len,
    })
}

fn arb_candidate() -> impl Strategy<Value = EntityRecord> {
    (0usize..40, 1usize..6).prop_map(|(start, len)| record("@custom", start, len))
}

/// Non-overlapping engine records laid out left to right.
fn arb_existing() -> impl Strategy<Value = DocumentEntitySet> {
    prop::collection::vec((0usize..4, 1usize..6), 0..6).prop_map(|gaps| {
        let mut cursor = 0;
        let records = gaps
            .into_iter()
            .map(|(gap, len)| {
                let start = cursor + gap;
                cursor = start + len;
                record("GPE", start, len)
            })
            .collect();
        DocumentEntitySet::from_records(records).unwrap()
    })
}

mod invariants {
    use super::*;

    proptest! {
        #[test]
        fn merged_set_never_overlaps(
            existing in arb_existing(),
            candidates in prop::collection::vec(arb_candidate(), 0..10),
        ) {
            let merged = SpanConflictResolver::new().resolve_all(candidates, existing);
            for pair in merged.records().windows(2) {
                prop_assert!(pair[0].span.end <= pair[1].span.start);
            }
        }

        #[test]
        fn candidate_kept_unless_strictly_longer_overlap(
            existing in arb_existing(),
            candidate in arb_candidate(),
        ) {
            let beaten = existing
                .iter()
                .any(|e| e.overlaps(&candidate) && e.len() > candidate.len());
            let merged = SpanConflictResolver::new().resolve(candidate.clone(), existing);
            prop_assert_eq!(merged.records().contains(&candidate), !beaten);
        }

        #[test]
        fn non_overlapping_records_are_untouched(
            existing in arb_existing(),
            candidate in arb_candidate(),
        ) {
            let untouched: Vec<EntityRecord> = existing
                .iter()
                .filter(|e| !e.overlaps(&candidate))
                .cloned()
                .collect();
            let merged = SpanConflictResolver::new().resolve(candidate, existing);
            for record in &untouched {
                prop_assert!(merged.records().contains(record));
            }
        }

        #[test]
        fn equal_length_candidate_replaces_existing(start in 0usize..30, len in 1usize..6) {
            let existing = DocumentEntitySet::from_records(vec![record("GPE", start, len)]).unwrap();
            let merged = SpanConflictResolver::new().resolve(record("@city", start, len), existing);
            prop_assert_eq!(merged.len(), 1);
            prop_assert_eq!(merged.records()[0].label.as_str(), "@city");
        }
    }
}

#[test]
fn shorter_existing_removed_even_when_candidate_loses() {
    // candidate [2, 6) overlaps a short record [1, 3) and a long one [4, 12)
    let existing = DocumentEntitySet::from_records(vec![
        record("DATE", 1, 2),
        record("GPE", 4, 8),
    ])
    .unwrap();
    let merged = SpanConflictResolver::new().resolve(record("@custom", 2, 4), existing);
    let labels: Vec<&str> = merged.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["GPE"]);
}

#[test]
fn empty_candidate_changes_nothing() {
    let existing = DocumentEntitySet::from_records(vec![record("GPE", 0, 2)]).unwrap();
    let before = existing.clone();
    let merged = SpanConflictResolver::new().resolve(
        EntityRecord::new("", "@custom", Span { start: 1, end: 1 }),
        existing,
    );
    assert_eq!(merged, before);
}
