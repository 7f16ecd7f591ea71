//! Process-wide cache of literal dictionaries and regex categories.
//!
//! # Concurrency
//!
//! ```text
//!   readers ──snapshot()──► Arc<StoreState> (immutable, cheap clone)
//!                                ▲
//!   writers ──lock(writer)──► clone map ─► apply ─► rebuild index ─► swap
//! ```
//!
//! The committed state is an `Arc<StoreState>` behind a read/write lock.
//! Matching takes a [`StoreSnapshot`] (an `Arc` clone) and never sees a later
//! mutation. Mutations serialise on a separate writer mutex, build a complete
//! new state off to the side, and swap it in with one short write-lock. A
//! failing mutation returns before the swap, so readers observe either the
//! old state or the new one.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use log::{debug, info, warn};
use regex::Regex;

use crate::config::RegexAnchor;
use crate::error::{Error, Result};
use crate::sync::{lock, read, write, Mutex, RwLock};
use crate::words::value_key;

/// Literal values to add (or remove), keyed by category name.
pub type LiteralUpdates = HashMap<String, Vec<String>>;

/// Regex patterns to set, keyed by category name.
pub type RegexUpdates = HashMap<String, String>;

// =============================================================================
// Categories
// =============================================================================

/// A compiled regex category.
///
/// The pattern is tested against single words with their leading and trailing
/// punctuation already stripped, so it cannot rely on that punctuation.
#[derive(Debug, Clone)]
pub struct RegexCategory {
    pattern: String,
    regex: Regex,
}

impl RegexCategory {
    /// Compile `pattern` for `category`, anchored per `anchor`.
    pub fn compile(category: &str, pattern: &str, anchor: RegexAnchor) -> Result<Self> {
        // Compile the raw pattern first so the error points at the caller's text.
        Regex::new(pattern).map_err(|e| Error::invalid_pattern(category, e.to_string()))?;
        let anchored = match anchor {
            RegexAnchor::Full => format!(r"\A(?:{})\z", pattern),
            RegexAnchor::Start => format!(r"\A(?:{})", pattern),
        };
        let regex =
            Regex::new(&anchored).map_err(|e| Error::invalid_pattern(category, e.to_string()))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Pattern as supplied by the caller.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Case-sensitive anchored test against one word.
    #[must_use]
    pub fn is_match(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }
}

/// A named entity category: literal values or one regex, never both.
#[derive(Debug, Clone)]
pub enum EntityCategory {
    /// Literal surface values: comparison key -> value as first supplied.
    Literal(BTreeMap<String, String>),
    /// Regex matched against single words.
    Regex(RegexCategory),
}

impl EntityCategory {
    /// Literal values as supplied, if this is a literal category.
    pub fn values(&self) -> Option<impl Iterator<Item = &str>> {
        match self {
            EntityCategory::Literal(values) => Some(values.values().map(String::as_str)),
            EntityCategory::Regex(_) => None,
        }
    }

    /// Pattern, if this is a regex category.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            EntityCategory::Literal(_) => None,
            EntityCategory::Regex(r) => Some(r.pattern()),
        }
    }
}

// =============================================================================
// Immutable state and snapshots
// =============================================================================

/// One committed version of the store, plus the lookup index derived from it.
#[derive(Debug, Default)]
struct StoreState {
    categories: BTreeMap<String, EntityCategory>,
    /// Literal value key -> categories containing it.
    literal_index: HashMap<String, BTreeSet<String>>,
    /// Word count of the longest literal value.
    longest_value_words: usize,
}

impl StoreState {
    fn build(categories: BTreeMap<String, EntityCategory>) -> Self {
        let mut literal_index: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut longest_value_words = 0;
        for (name, category) in &categories {
            if let EntityCategory::Literal(values) = category {
                for key in values.keys() {
                    longest_value_words = longest_value_words.max(key.split(' ').count());
                    literal_index
                        .entry(key.clone())
                        .or_default()
                        .insert(name.clone());
                }
            }
        }
        Self {
            categories,
            literal_index,
            longest_value_words,
        }
    }
}

/// Immutable view of the store used by one matching call.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    state: Arc<StoreState>,
}

impl StoreSnapshot {
    /// Build a one-off snapshot from caller-supplied dictionaries, without
    /// touching any shared store.
    pub fn build(
        literals: &LiteralUpdates,
        regexes: &RegexUpdates,
        anchor: RegexAnchor,
    ) -> Result<Self> {
        let mut categories = BTreeMap::new();
        apply_populate(&mut categories, literals, compile_all(regexes, anchor)?)?;
        Ok(Self {
            state: Arc::new(StoreState::build(categories)),
        })
    }

    /// Look up a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&EntityCategory> {
        self.state.categories.get(name)
    }

    /// All categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &EntityCategory)> {
        self.state.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Categories containing the literal value with comparison key `key`.
    #[must_use]
    pub fn literal_categories(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.state.literal_index.get(key)
    }

    /// Regex categories in name order.
    pub fn regex_categories(&self) -> impl Iterator<Item = (&str, &RegexCategory)> {
        self.state.categories.iter().filter_map(|(k, v)| match v {
            EntityCategory::Regex(r) => Some((k.as_str(), r)),
            EntityCategory::Literal(_) => None,
        })
    }

    /// True if at least one literal value is present.
    #[must_use]
    pub fn has_literals(&self) -> bool {
        !self.state.literal_index.is_empty()
    }

    /// Word count of the longest literal value (0 when there are none).
    #[must_use]
    pub fn longest_value_words(&self) -> usize {
        self.state.longest_value_words
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.categories.len()
    }

    /// True when the snapshot holds no category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.categories.is_empty()
    }
}

// =============================================================================
// EntityStore
// =============================================================================

/// Mutable, shareable store of entity categories.
///
/// Share it with `Arc<EntityStore>`; all methods take `&self`.
///
/// # Example
///
/// ```rust
/// use lexner::{EntityStore, LiteralUpdates, RegexUpdates};
///
/// let store = EntityStore::new();
/// let mut literals = LiteralUpdates::new();
/// literals.insert("cars".into(), vec!["Focus".into(), "Golf".into()]);
/// store.populate(&literals, &RegexUpdates::new()).unwrap();
///
/// let snapshot = store.snapshot();
/// assert!(snapshot.literal_categories("focus").unwrap().contains("cars"));
/// ```
#[derive(Debug, Default)]
pub struct EntityStore {
    state: RwLock<Arc<StoreState>>,
    writer: Mutex<()>,
    anchor: RegexAnchor,
}

impl EntityStore {
    /// Create an empty store with full-word regex anchoring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given regex anchoring.
    #[must_use]
    pub fn with_anchor(anchor: RegexAnchor) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    /// Regex anchoring applied to patterns at populate time.
    #[must_use]
    pub fn anchor(&self) -> RegexAnchor {
        self.anchor
    }

    /// Immutable view for one matching call.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            state: Arc::clone(&read(&self.state)),
        }
    }

    /// Union literal values into their categories and set/replace regex
    /// categories.
    ///
    /// A category given an empty value list is left as it is; only
    /// [`delete`](Self::delete) removes categories.
    ///
    /// Every regex is compiled before anything is applied; any failure returns
    /// an error and leaves the store untouched.
    pub fn populate(&self, literals: &LiteralUpdates, regexes: &RegexUpdates) -> Result<()> {
        let compiled = compile_all(regexes, self.anchor)?;

        let _writer = lock(&self.writer);
        let mut categories = read(&self.state).categories.clone();
        apply_populate(&mut categories, literals, compiled)?;
        self.commit(categories);

        info!(
            "Populated {} literal and {} regex categories",
            literals.len(),
            regexes.len()
        );
        Ok(())
    }

    /// Remove categories or individual literal values.
    ///
    /// An empty value list removes the whole category; otherwise only the
    /// listed values go, and a category left with no value is removed.
    /// Unknown categories and values are ignored.
    pub fn delete(&self, deletes: &LiteralUpdates) -> Result<()> {
        validate_names(deletes.keys())?;

        let _writer = lock(&self.writer);
        let mut categories = read(&self.state).categories.clone();
        for (name, values) in deletes {
            if values.is_empty() {
                if categories.remove(name).is_some() {
                    info!("Deleted category '{}'", name);
                } else {
                    debug!("Delete of unknown category '{}' ignored", name);
                }
                continue;
            }
            match categories.get_mut(name) {
                Some(EntityCategory::Literal(existing)) => {
                    for key in values.iter().filter_map(|v| value_key(v)) {
                        existing.remove(&key);
                    }
                    if existing.is_empty() {
                        categories.remove(name);
                        info!("Deleted category '{}' (no values left)", name);
                    }
                }
                Some(EntityCategory::Regex(_)) => {
                    debug!("Value delete on regex category '{}' ignored", name);
                }
                None => debug!("Delete of unknown category '{}' ignored", name),
            }
        }
        self.commit(categories);
        Ok(())
    }

    /// Number of categories currently committed.
    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.state).categories.len()
    }

    /// True when no category is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        read(&self.state).categories.is_empty()
    }

    fn commit(&self, categories: BTreeMap<String, EntityCategory>) {
        let next = Arc::new(StoreState::build(categories));
        *write(&self.state) = next;
    }
}

fn validate_names<'a>(names: impl IntoIterator<Item = &'a String>) -> Result<()> {
    for name in names {
        if name.trim().is_empty() {
            return Err(Error::invalid_input("category name must not be empty"));
        }
    }
    Ok(())
}

fn compile_all(regexes: &RegexUpdates, anchor: RegexAnchor) -> Result<Vec<(String, RegexCategory)>> {
    validate_names(regexes.keys())?;
    regexes
        .iter()
        .map(|(name, pattern)| {
            RegexCategory::compile(name, pattern, anchor)
                .map(|compiled| (name.clone(), compiled))
                .map_err(|e| {
                    warn!("Rejected regex for category '{}': {}", name, e);
                    e
                })
        })
        .collect()
}

/// Apply a populate payload to a private copy of the category map.
fn apply_populate(
    categories: &mut BTreeMap<String, EntityCategory>,
    literals: &LiteralUpdates,
    compiled: Vec<(String, RegexCategory)>,
) -> Result<()> {
    validate_names(literals.keys())?;
    if let Some((name, _)) = compiled.iter().find(|(name, _)| literals.contains_key(name)) {
        return Err(Error::invalid_input(format!(
            "category '{}' given both literal values and a regex",
            name
        )));
    }

    for (name, values) in literals {
        let mut keyed = Vec::with_capacity(values.len());
        for value in values {
            let key = value_key(value).ok_or_else(|| {
                Error::invalid_input(format!(
                    "category '{}' has a value with no words: {:?}",
                    name, value
                ))
            })?;
            keyed.push((key, value.trim().to_string()));
        }
        if keyed.is_empty() {
            debug!("Populate of '{}' with no values ignored", name);
            continue;
        }

        let entry = categories
            .entry(name.clone())
            .or_insert_with(|| EntityCategory::Literal(BTreeMap::new()));
        if let EntityCategory::Regex(_) = entry {
            warn!("Literal values replace regex category '{}'", name);
            *entry = EntityCategory::Literal(BTreeMap::new());
        }
        if let EntityCategory::Literal(existing) = entry {
            for (key, value) in keyed {
                existing.entry(key).or_insert(value);
            }
        }
    }

    for (name, compiled) in compiled {
        categories.insert(name, EntityCategory::Regex(compiled));
    }
    Ok(())
}
