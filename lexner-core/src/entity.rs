//! Span, match and entity-set types.
//!
//! Offsets are unit-agnostic: a [`Span`] over engine tokens counts tokens, a
//! span over raw text counts characters. Callers never mix the two inside one
//! [`DocumentEntitySet`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};

// =============================================================================
// Span
// =============================================================================

/// Half-open interval `[start, end)` over characters or tokens.
///
/// A well-formed span is never empty (`start < end`). [`Span::new`] enforces
/// this; the fields stay public for cheap construction in hot loops, and
/// [`DocumentEntitySet`] re-validates on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span, rejecting empty or inverted intervals.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of units covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for a degenerate span (never produced by [`Span::new`]).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Overlap predicate used everywhere in lexner: `a.start < b.end && b.start < a.end`.
    ///
    /// Touching spans (`a.end == b.start`) do not overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `other` lies entirely inside `self`.
    #[must_use]
    pub const fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// =============================================================================
// Dictionary / regex match output
// =============================================================================

/// Which matcher produced a [`MatchHit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Literal dictionary value.
    Literal,
    /// Regex category pattern.
    Regex,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Literal => write!(f, "literal"),
            SourceKind::Regex => write!(f, "regex"),
        }
    }
}

/// One category match for one piece of surface text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchHit {
    /// Text exactly as it appeared in the input.
    pub text: String,
    /// Category name the text matched.
    pub category: String,
    /// Matcher that produced the hit.
    pub source: SourceKind,
}

impl MatchHit {
    /// Hit from a literal dictionary value.
    #[must_use]
    pub fn literal(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            source: SourceKind::Literal,
        }
    }

    /// Hit from a regex category.
    #[must_use]
    pub fn regex(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            source: SourceKind::Regex,
        }
    }
}

/// Matched surface text mapped to the set of categories it matched.
///
/// Serializes as a plain JSON object: `{"Focus": ["cars"]}`. An empty result
/// is a valid value and serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCheckResult {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl EntityCheckResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `category` for `text`. Returns `false` if it was already present.
    pub fn insert(&mut self, text: impl Into<String>, category: impl Into<String>) -> bool {
        self.entries
            .entry(text.into())
            .or_default()
            .insert(category.into())
    }

    /// Categories matched by `text`, if any.
    #[must_use]
    pub fn categories(&self, text: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(text)
    }

    /// True if `text` matched at least one category.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Number of distinct matched texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(text, categories)` in text order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Unwrap into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, BTreeSet<String>> {
        self.entries
    }
}

impl Extend<MatchHit> for EntityCheckResult {
    fn extend<I: IntoIterator<Item = MatchHit>>(&mut self, iter: I) {
        for hit in iter {
            self.insert(hit.text, hit.category);
        }
    }
}

impl FromIterator<MatchHit> for EntityCheckResult {
    fn from_iter<I: IntoIterator<Item = MatchHit>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

// =============================================================================
// Entity records and document entity sets
// =============================================================================

/// A region of a document recognized as one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Surface text of the entity
    pub text: String,
    /// Category or model label (e.g. `GPE`, `@cars`)
    pub label: String,
    /// Extent of the entity
    pub span: Span,
}

impl EntityRecord {
    /// Create a record.
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            span,
        }
    }

    /// Span length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// True for a degenerate span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Check whether two records claim overlapping text.
    #[must_use]
    pub fn overlaps(&self, other: &EntityRecord) -> bool {
        self.span.overlaps(&other.span)
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{'{}', label:{}, at({})}}", self.text, self.label, self.span)
    }
}

/// Start-ordered sequence of pairwise non-overlapping [`EntityRecord`]s.
///
/// Every constructor and mutator keeps the invariant; deserialization goes
/// through [`DocumentEntitySet::from_records`] as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EntityRecord>", into = "Vec<EntityRecord>")]
pub struct DocumentEntitySet {
    records: Vec<EntityRecord>,
}

impl DocumentEntitySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from arbitrary records, sorting them by start.
    ///
    /// Fails on an empty span or on any pair of overlapping records.
    pub fn from_records(mut records: Vec<EntityRecord>) -> Result<Self> {
        for record in &records {
            if record.span.is_empty() {
                return Err(Error::InvalidSpan {
                    start: record.span.start,
                    end: record.span.end,
                });
            }
        }
        records.sort_by_key(|r| (r.span.start, r.span.end));
        // Sorted by start: any overlap shows up between neighbours.
        if let Some(pair) = records.windows(2).find(|w| w[0].overlaps(&w[1])) {
            return Err(Error::overlap(format!("{} and {}", pair[0], pair[1])));
        }
        Ok(Self { records })
    }

    /// Insert a record at its sorted position.
    ///
    /// Hands the record back if it is degenerate or overlaps a member.
    pub fn try_insert(&mut self, record: EntityRecord) -> std::result::Result<(), EntityRecord> {
        if record.is_empty() || self.records.iter().any(|r| r.overlaps(&record)) {
            return Err(record);
        }
        let idx = self
            .records
            .partition_point(|r| r.span.start < record.span.start);
        self.records.insert(idx, record);
        Ok(())
    }

    /// Keep only the records for which `keep` returns true.
    pub fn retain<F: FnMut(&EntityRecord) -> bool>(&mut self, keep: F) {
        self.records.retain(keep);
    }

    /// Records in start order.
    #[must_use]
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Iterate records in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the set holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<Vec<EntityRecord>> for DocumentEntitySet {
    type Error = Error;

    fn try_from(records: Vec<EntityRecord>) -> Result<Self> {
        Self::from_records(records)
    }
}

impl From<DocumentEntitySet> for Vec<EntityRecord> {
    fn from(set: DocumentEntitySet) -> Self {
        set.records
    }
}

impl<'a> IntoIterator for &'a DocumentEntitySet {
    type Item = &'a EntityRecord;
    type IntoIter = std::slice::Iter<'a, EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Engine tokens
// =============================================================================

/// A token as produced by the statistical engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text as it appears in the input
    pub text: String,
    /// Lemma (the engine may use `-PRON-` for pronouns)
    #[serde(default)]
    pub lemma: String,
    /// Part-of-speech tag
    #[serde(default)]
    pub tag: String,
    /// Entity type the engine assigned to this token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ent_type: Option<String>,
    /// Start character offset in the input (inclusive)
    pub start: usize,
    /// End character offset in the input (exclusive)
    pub end: usize,
}

impl Token {
    /// Create a token whose lemma is its own text and which carries no tags.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        let text = text.into();
        Self {
            lemma: text.clone(),
            text,
            tag: String::new(),
            ent_type: None,
            start,
            end,
        }
    }

    /// Set the lemma.
    #[must_use]
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the part-of-speech tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the entity type.
    #[must_use]
    pub fn with_ent_type(mut self, ent_type: impl Into<String>) -> Self {
        self.ent_type = Some(ent_type.into());
        self
    }

    /// Lower-cased token text.
    #[must_use]
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// True if the text parses as a floating point number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.text.trim().parse::<f64>().is_ok()
    }

    /// True if the engine tagged this token with `ent_type`.
    #[must_use]
    pub fn has_ent_type(&self, ent_type: &str) -> bool {
        self.ent_type.as_deref() == Some(ent_type)
    }
}
