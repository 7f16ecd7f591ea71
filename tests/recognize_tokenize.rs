//! Engine path: recognition with custom vocabulary, and downstream tokenization.

use lexner::{
    EntityFinder, MockEngine, NamedEntity, StoplistSize, Token, TokenizeConfig, Vocabulary,
};
use lexner_core::{DocumentEntitySet, EntityRecord, Span};

fn places_engine() -> MockEngine {
    MockEngine::new("mock")
        .with_entity("London", "GPE")
        .with_entity("New York", "GPE")
        .with_entity("tomorrow", "DATE")
        .with_entity("Acme", "NORP")
}

fn finder() -> EntityFinder {
    EntityFinder::new().engine(places_engine())
}

fn entity(value: &str, category: &str, start: usize, end: usize) -> NamedEntity {
    NamedEntity {
        value: value.into(),
        category: category.into(),
        start,
        end,
    }
}

// =============================================================================
// Recognition
// =============================================================================

#[test]
fn single_place() {
    assert_eq!(
        finder().recognize("London").unwrap(),
        vec![entity("London", "sys.places", 0, 6)]
    );
}

#[test]
fn nothing_to_recognize() {
    assert!(finder().recognize("Nothing").unwrap().is_empty());
}

#[test]
fn place_and_date_in_order() {
    assert_eq!(
        finder()
            .recognize("What weather is it in London tomorrow")
            .unwrap(),
        vec![
            entity("London", "sys.places", 22, 28),
            entity("tomorrow", "sys.date", 29, 37),
        ]
    );
}

#[test]
fn two_word_place_is_one_entity() {
    let found = finder().recognize("Whats the weather in New York").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category, "sys.places");
    assert_eq!(found[0].value, "New York");
}

#[test]
fn uncategorised_labels_are_dropped() {
    assert!(finder().recognize("Acme").unwrap().is_empty());
}

#[test]
fn vocabulary_overrides_engine_on_tie() {
    let finder = finder();
    finder.add_vocabulary("London", "office").unwrap();
    assert_eq!(
        finder.recognize("meet me in London").unwrap(),
        vec![entity("London", "@office", 11, 17)]
    );
}

#[test]
fn longer_engine_entity_beats_vocabulary() {
    let finder = finder();
    finder.add_vocabulary("York", "city").unwrap();
    let found = finder.recognize("flying to New York").unwrap();
    assert_eq!(found, vec![entity("New York", "sys.places", 10, 18)]);
}

#[test]
fn vocabulary_without_engine_entities() {
    let finder = EntityFinder::new();
    finder.add_vocabulary("the big smoke", "@nickname").unwrap();
    assert_eq!(
        finder.recognize("off to The Big Smoke!").unwrap(),
        vec![entity("The Big Smoke", "@nickname", 7, 20)]
    );
}

#[test]
fn blank_vocabulary_is_rejected() {
    let finder = EntityFinder::new();
    assert!(finder.add_vocabulary("   ", "city").is_err());
    assert!(finder.vocabulary().is_empty());
}

#[test]
fn find_entities_in_doc_uses_token_offsets() {
    let tokens = vec![
        Token::new("fly", 0, 3),
        Token::new("to", 4, 6),
        Token::new("New", 7, 10),
        Token::new("York", 11, 15),
    ];
    let existing = DocumentEntitySet::from_records(vec![EntityRecord::new(
        "York",
        "GPE",
        Span { start: 3, end: 4 },
    )])
    .unwrap();
    let mut vocabulary = Vocabulary::new();
    vocabulary.add("new york", "@city").unwrap();

    let merged = EntityFinder::new().find_entities_in_doc(&tokens, existing, &vocabulary);
    assert_eq!(merged.len(), 1);
    let record = &merged.records()[0];
    assert_eq!(record.label, "@city");
    assert_eq!(record.span, Span { start: 2, end: 4 });
    assert_eq!(record.text, "New York");
}

// =============================================================================
// Tokenization
// =============================================================================

#[test]
fn tokenize_single_word() {
    assert_eq!(EntityFinder::new().tokenize("hi").unwrap(), vec!["hi"]);
}

#[test]
fn tokenize_drops_stopwords_and_symbols() {
    assert_eq!(
        EntityFinder::new()
            .tokenize("What is the weather in London?")
            .unwrap(),
        vec!["what", "weather", "london"]
    );
}

#[test]
fn tokenize_large_stoplist() {
    let config = TokenizeConfig {
        stoplist: StoplistSize::Large,
        ..TokenizeConfig::default()
    };
    assert_eq!(
        EntityFinder::new()
            .tokenize_with("What is the weather in London?", config)
            .unwrap(),
        vec!["weather", "london"]
    );
}

#[test]
fn tokenize_filters_people() {
    let finder = EntityFinder::new().engine(MockEngine::new("mock").with_entity("John", "PERSON"));
    let config = TokenizeConfig {
        filter_entities: true,
        ..TokenizeConfig::default()
    };
    assert_eq!(
        finder.tokenize_with("call John", config).unwrap(),
        vec!["call"]
    );
    assert_eq!(finder.tokenize_with("John", config).unwrap(), vec!["person"]);
}
