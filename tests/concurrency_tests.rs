//! Concurrency tests for the live store.
//!
//! These tests verify that:
//! - The store, its snapshots and the finder are `Send + Sync`
//! - Readers never observe a half-applied mutation
//! - Concurrent writers never lose an update

use lexner::{EntityFinder, EntityStore, LiteralUpdates, RegexUpdates, StoreSnapshot};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

fn single(category: &str, values: &[&str]) -> LiteralUpdates {
    let mut update = LiteralUpdates::new();
    update.insert(
        category.to_string(),
        values.iter().map(|v| v.to_string()).collect(),
    );
    update
}

// =============================================================================
// Thread Safety
// =============================================================================

#[test]
fn store_types_are_send_sync() {
    assert_send_sync::<EntityStore>();
    assert_send_sync::<StoreSnapshot>();
    assert_send_sync::<EntityFinder>();
}

// =============================================================================
// Atomic Visibility
// =============================================================================

#[test]
fn readers_see_whole_populates() {
    let finder = Arc::new(EntityFinder::new());
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let finder = Arc::clone(&finder);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut checks = 0usize;
                while !done.load(Ordering::Acquire) || checks == 0 {
                    let result = finder.check_entities("a Focus and an Apple", None);
                    // Both categories arrive in one populate and leave in one
                    // delete, so they are seen together or not at all.
                    assert!(
                        result.is_empty() || result.len() == 2,
                        "partial state observed: {:?}",
                        result
                    );
                    checks += 1;
                }
                checks
            })
        })
        .collect();

    let mut both = single("cars", &["Focus"]);
    both.extend(single("fruits", &["Apple"]));
    let mut remove = single("cars", &[]);
    remove.extend(single("fruits", &[]));

    for _ in 0..200 {
        finder.populate_entities(&both, &RegexUpdates::new()).unwrap();
        finder.delete_entities(&remove).unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
}

#[test]
fn concurrent_writers_lose_nothing() {
    let store = Arc::new(EntityStore::new());

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for j in 0..25 {
                    let value = format!("value{}x{}", i, j);
                    store
                        .populate(&single("shared", &[value.as_str()]), &RegexUpdates::new())
                        .unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let snapshot = store.snapshot();
    let count = snapshot
        .category("shared")
        .and_then(|c| c.values())
        .map(|values| values.count())
        .unwrap_or(0);
    assert_eq!(count, 8 * 25);
}

#[test]
fn snapshot_is_stable_while_writers_run() {
    let store = Arc::new(EntityStore::new());
    store
        .populate(&single("cars", &["Focus"]), &RegexUpdates::new())
        .unwrap();
    let pinned = store.snapshot();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..100 {
                let value = format!("car{}", i);
                store
                    .populate(&single("cars", &[value.as_str()]), &RegexUpdates::new())
                    .unwrap();
            }
            store.delete(&single("cars", &[])).unwrap();
        })
    };
    writer.join().unwrap();

    assert_eq!(pinned.len(), 1);
    assert!(pinned.literal_categories("focus").is_some());
    assert!(pinned.literal_categories("car5").is_none());
    assert!(store.is_empty());
}

#[test]
fn shared_finder_checks_from_many_threads() {
    let finder = Arc::new(EntityFinder::new());
    let mut regexes = RegexUpdates::new();
    regexes.insert("alarms".into(), "A\\d{3}".into());
    finder
        .populate_entities(&single("cars", &["Focus", "Golf"]), &regexes)
        .unwrap();

    let handles: Vec<_> = ["Focus", "Golf", "A213", "nothing"]
        .into_iter()
        .map(|text| {
            let finder = Arc::clone(&finder);
            thread::spawn(move || finder.check_entities(text, None).len())
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![1, 1, 1, 0]);
}
