//! The in-process service surface.
//!
//! [`EntityFinder`] owns the live [`EntityStore`], the statistical engine and
//! the custom vocabulary, and exposes the operations a transport wrapper maps
//! requests onto:
//!
//! | Operation | Path |
//! |-----------|------|
//! | [`populate_entities`](EntityFinder::populate_entities) | store write |
//! | [`delete_entities`](EntityFinder::delete_entities) | store write |
//! | [`check_entities`](EntityFinder::check_entities) | dictionary |
//! | [`find_entities_in_doc`](EntityFinder::find_entities_in_doc) | engine tokens |
//! | [`recognize`](EntityFinder::recognize) | engine + vocabulary |
//! | [`tokenize`](EntityFinder::tokenize) | engine + stoplists |
//!
//! All methods take `&self`; share the finder with `Arc<EntityFinder>`.

use std::sync::Arc;

use lexner_core::{DocumentEntitySet, EntityCheckResult, Token};
use log::{debug, info};

use crate::api::{CheckRequest, CheckResponse, DeleteRequest, PopulateRequest};
use crate::backends::{Matcher, PlainValueMatcher, PriorityMerger, RegexMatcher, Vocabulary};
use crate::categories::{custom_category, system_category, NamedEntity};
use crate::config::{FinderConfig, TokenizeConfig};
use crate::engine::{BasicEngine, StatisticalEngine};
use crate::error::Result;
use crate::offset::SpanConverter;
use crate::resolve;
use crate::store::{EntityStore, LiteralUpdates, RegexUpdates, StoreSnapshot};
use crate::sync::{read, write, RwLock};
use crate::tokenize;
use crate::words::split_words;

/// Entity matching service.
///
/// # Example
///
/// ```rust
/// use lexner::{EntityFinder, LiteralUpdates, RegexUpdates};
///
/// let finder = EntityFinder::new();
/// let mut cars = LiteralUpdates::new();
/// cars.insert("cars".into(), vec!["Focus".into()]);
/// finder.populate_entities(&cars, &RegexUpdates::new()).unwrap();
///
/// let result = finder.check_entities("a Focus", None);
/// assert!(result.categories("Focus").unwrap().contains("cars"));
/// ```
pub struct EntityFinder {
    config: FinderConfig,
    store: EntityStore,
    engine: Box<dyn StatisticalEngine>,
    vocabulary: RwLock<Arc<Vocabulary>>,
    matchers: Vec<Box<dyn Matcher>>,
    merger: PriorityMerger,
}

impl std::fmt::Debug for EntityFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityFinder")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl Default for EntityFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityFinder {
    /// Finder with default config and the [`BasicEngine`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FinderConfig::default())
    }

    /// Finder with `config` and the [`BasicEngine`].
    #[must_use]
    pub fn with_config(config: FinderConfig) -> Self {
        let matchers: Vec<Box<dyn Matcher>> = vec![
            Box::new(PlainValueMatcher::new().with_max_phrase_words(config.max_phrase_words)),
            Box::new(RegexMatcher::new()),
        ];
        Self {
            store: EntityStore::with_anchor(config.regex_anchor),
            config,
            engine: Box::new(BasicEngine::new()),
            vocabulary: RwLock::new(Arc::new(Vocabulary::new())),
            matchers,
            merger: PriorityMerger::new(),
        }
    }

    /// Replace the statistical engine.
    #[must_use]
    pub fn engine(mut self, engine: impl StatisticalEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// The live store.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    // =========================================================================
    // Dictionary path
    // =========================================================================

    /// Union literal values into the live store and set regex categories.
    ///
    /// Fails with [`Error::InvalidPattern`](crate::Error::InvalidPattern) if any
    /// pattern does not compile; the store is then unchanged.
    pub fn populate_entities(&self, literals: &LiteralUpdates, regexes: &RegexUpdates) -> Result<()> {
        self.store.populate(literals, regexes)
    }

    /// Remove categories or values from the live store.
    pub fn delete_entities(&self, deletes: &LiteralUpdates) -> Result<()> {
        self.store.delete(deletes)
    }

    /// Match `text` against `snapshot`, or against the live store when `None`.
    #[must_use]
    pub fn check_entities(&self, text: &str, snapshot: Option<&StoreSnapshot>) -> EntityCheckResult {
        let live;
        let snapshot = match snapshot {
            Some(s) => s,
            None => {
                live = self.store.snapshot();
                &live
            }
        };

        let words = split_words(text);
        let hits = self
            .matchers
            .iter()
            .flat_map(|m| {
                let found = m.find(text, &words, snapshot);
                debug!("{} matcher: {} hits", m.name(), found.len());
                found
            })
            .collect::<Vec<_>>();
        self.merger.merge(hits)
    }

    /// Build a one-off snapshot from caller-supplied dictionaries.
    pub fn one_off_snapshot(&self, literals: &LiteralUpdates, regexes: &RegexUpdates) -> Result<StoreSnapshot> {
        StoreSnapshot::build(literals, regexes, self.config.regex_anchor)
    }

    /// Apply a [`PopulateRequest`].
    pub fn populate(&self, request: &PopulateRequest) -> Result<()> {
        self.populate_entities(&request.entities, &request.regex_entities)
    }

    /// Apply a [`DeleteRequest`].
    pub fn delete(&self, request: &DeleteRequest) -> Result<()> {
        self.delete_entities(&request.entities)
    }

    /// Answer a [`CheckRequest`], building a one-off store if it carries
    /// dictionaries.
    pub fn check(&self, request: &CheckRequest) -> Result<CheckResponse> {
        let entities = if request.is_one_off() {
            let snapshot = self.one_off_snapshot(
                request.entities.as_ref().unwrap_or(&LiteralUpdates::new()),
                request.regex_entities.as_ref().unwrap_or(&RegexUpdates::new()),
            )?;
            self.check_entities(&request.conversation, Some(&snapshot))
        } else {
            self.check_entities(&request.conversation, None)
        };
        Ok(CheckResponse {
            conversation: request.conversation.clone(),
            entities,
        })
    }

    // =========================================================================
    // Engine path
    // =========================================================================

    /// Merge `vocabulary` hits over `tokens` into `existing` (token offsets).
    #[must_use]
    pub fn find_entities_in_doc(
        &self,
        tokens: &[Token],
        existing: DocumentEntitySet,
        vocabulary: &Vocabulary,
    ) -> DocumentEntitySet {
        resolve::find_entities_in_doc(tokens, existing, vocabulary)
    }

    /// Register a custom vocabulary phrase used by [`recognize`](Self::recognize).
    ///
    /// The category gets an `@` prefix if it lacks one, so it is reported
    /// verbatim.
    pub fn add_vocabulary(&self, phrase: &str, category: &str) -> Result<()> {
        let category = custom_category(category);
        let mut guard = write(&self.vocabulary);
        let mut next = Vocabulary::clone(&guard);
        next.add(phrase, &category)?;
        *guard = Arc::new(next);
        info!("Added vocabulary '{}' as {}", phrase.trim(), category);
        Ok(())
    }

    /// Current custom vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> Arc<Vocabulary> {
        Arc::clone(&read(&self.vocabulary))
    }

    /// Run the engine, merge vocabulary hits and report categorised entities
    /// in character offsets.
    pub fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>> {
        let doc = self.engine.analyze(text)?;
        let vocabulary = self.vocabulary();
        let merged = resolve::find_entities_in_doc(&doc.tokens, doc.entities, &vocabulary);

        let converter = SpanConverter::new(text);
        let char_len = text.chars().count();
        let mut found = Vec::with_capacity(merged.len());
        for record in &merged {
            let (Some(first), Some(last)) = (
                doc.tokens.get(record.span.start),
                doc.tokens.get(record.span.end - 1),
            ) else {
                debug!("Entity {} is outside the token stream", record);
                continue;
            };
            let Some(category) = system_category(&record.label) else {
                info!("Skipping uncategorized entity {}", record);
                continue;
            };
            if first.start >= last.end || last.end > char_len {
                debug!(
                    "Entity {} has char offsets {}..{} outside the text",
                    record, first.start, last.end
                );
                continue;
            }
            let value = &text[converter.char_to_byte(first.start)..converter.char_to_byte(last.end)];
            found.push(NamedEntity {
                value: value.to_string(),
                category,
                start: first.start,
                end: last.end,
            });
        }
        Ok(found)
    }

    /// Engine tokens normalised with the configured [`TokenizeConfig`].
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        self.tokenize_with(text, self.config.tokenize)
    }

    /// Engine tokens normalised with `config`.
    pub fn tokenize_with(&self, text: &str, config: TokenizeConfig) -> Result<Vec<String>> {
        let doc = self.engine.analyze(text)?;
        Ok(tokenize::tokenize(&doc.tokens, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AnalyzedDoc, MockEngine};
    use lexner_core::{EntityRecord, Span};

    fn literals(pairs: &[(&str, &[&str])]) -> LiteralUpdates {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_check_uses_live_store() {
        let finder = EntityFinder::new();
        finder
            .populate_entities(&literals(&[("cars", &["Focus"])]), &RegexUpdates::new())
            .unwrap();
        let result = finder.check_entities("a Focus", None);
        assert_eq!(result.len(), 1);
        assert!(finder.check_entities("a Golf", None).is_empty());
    }

    #[test]
    fn test_check_request_one_off_ignores_live_store() {
        let finder = EntityFinder::new();
        finder
            .populate_entities(&literals(&[("cars", &["Focus"])]), &RegexUpdates::new())
            .unwrap();
        let request = CheckRequest {
            conversation: "a Focus and a Pear".into(),
            entities: Some(literals(&[("fruits", &["Pear"])])),
            regex_entities: None,
        };
        let response = finder.check(&request).unwrap();
        assert!(response.entities.contains_text("Pear"));
        assert!(!response.entities.contains_text("Focus"));
    }

    #[test]
    fn test_check_request_bad_regex() {
        let finder = EntityFinder::new();
        let mut regexes = RegexUpdates::new();
        regexes.insert("bad".into(), "[a".into());
        let request = CheckRequest {
            conversation: "a".into(),
            entities: None,
            regex_entities: Some(regexes),
        };
        assert!(finder.check(&request).unwrap_err().is_invalid_pattern());
    }

    #[test]
    fn test_recognize_places_and_dates() {
        let finder = EntityFinder::new().engine(
            MockEngine::new("mock")
                .with_entity("London", "GPE")
                .with_entity("tomorrow", "DATE"),
        );
        let found = finder
            .recognize("What weather is it in London tomorrow")
            .unwrap();
        assert_eq!(
            found,
            vec![
                NamedEntity {
                    value: "London".into(),
                    category: "sys.places".into(),
                    start: 22,
                    end: 28,
                },
                NamedEntity {
                    value: "tomorrow".into(),
                    category: "sys.date".into(),
                    start: 29,
                    end: 37,
                },
            ]
        );
    }

    #[test]
    fn test_recognize_skips_uncategorized() {
        let finder = EntityFinder::new().engine(MockEngine::new("mock").with_entity("Tory", "NORP"));
        assert!(finder.recognize("a Tory plan").unwrap().is_empty());
    }

    #[test]
    fn test_vocabulary_overrides_equal_length_entity() {
        let finder = EntityFinder::new().engine(MockEngine::new("mock").with_entity("London", "GPE"));
        finder.add_vocabulary("london", "office").unwrap();
        let found = finder.recognize("Meet in London").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "@office");
        assert_eq!(found[0].value, "London");
    }

    /// Engine whose token offsets run past the end of the text.
    struct OverrunEngine;

    impl StatisticalEngine for OverrunEngine {
        fn analyze(&self, _text: &str) -> Result<AnalyzedDoc> {
            let tokens = vec![Token::new("Paris", 0, 5), Token::new("France", 40, 46)];
            let entities = DocumentEntitySet::from_records(vec![
                EntityRecord::new("Paris", "GPE", Span { start: 0, end: 1 }),
                EntityRecord::new("France", "GPE", Span { start: 1, end: 2 }),
            ])?;
            Ok(AnalyzedDoc { tokens, entities })
        }
    }

    #[test]
    fn test_recognize_skips_offsets_past_text_end() {
        let finder = EntityFinder::new().engine(OverrunEngine);
        let found = finder.recognize("Paris").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "Paris");
        assert_eq!((found[0].start, found[0].end), (0, 5));
    }

    #[test]
    fn test_tokenize_uses_config() {
        let finder = EntityFinder::new();
        assert_eq!(finder.tokenize("hi").unwrap(), vec!["hi"]);
    }
}
