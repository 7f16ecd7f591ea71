//! The statistical NLP engine seam.
//!
//! lexner does not ship a statistical model. Whatever does tokenization,
//! lemmatization and generic entity detection plugs in through
//! [`StatisticalEngine`]; lexner only consumes the resulting tokens and entity
//! spans.
//!
//! Two engines come with the crate:
//!
//! - [`BasicEngine`]: rule-based token splitter with no entities, enough for
//!   vocabulary matching and downstream tokenization.
//! - [`MockEngine`]: [`BasicEngine`] tokens plus preset entity labels, for
//!   tests and demos.

use lexner_core::{DocumentEntitySet, EntityRecord, Span, Token};

use crate::error::Result;
use crate::offset::SpanConverter;
use crate::words::is_edge_punctuation;

/// Engine output for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedDoc {
    /// Tokens with character offsets into the analysed text.
    pub tokens: Vec<Token>,
    /// Detected entities, spans in token offsets.
    pub entities: DocumentEntitySet,
}

/// A statistical NLP engine.
///
/// Implementations must be callable from many threads at once.
pub trait StatisticalEngine: Send + Sync {
    /// Tokenize `text` and detect generic entities.
    fn analyze(&self, text: &str) -> Result<AnalyzedDoc>;

    /// Engine name.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

// =============================================================================
// BasicEngine
// =============================================================================

/// Contraction suffixes split off their word, `n't` first.
const CONTRACTION_SUFFIXES: &[&str] = &["n't", "'s", "'m", "'re", "'ve", "'ll", "'d"];

/// Rule-based tokenizer.
///
/// Splits on whitespace, peels punctuation off word edges (runs of one
/// character such as `...` stay together), and splits English contractions
/// (`don't` → `do` `n't`). Lemmas are the lower-cased text; tags are `NUM`,
/// `PUNCT` or `X`. No entity is ever detected.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEngine;

impl BasicEngine {
    /// Create the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Tokenize without the `Result` wrapper.
    #[must_use]
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        let converter = SpanConverter::new(text);
        let mut ranges = Vec::new();
        let mut chunk_start: Option<usize> = None;
        for (idx, ch) in text.char_indices() {
            match (ch.is_whitespace(), chunk_start) {
                (true, Some(start)) => {
                    split_chunk(&text[start..idx], start, &mut ranges);
                    chunk_start = None;
                }
                (false, None) => chunk_start = Some(idx),
                _ => {}
            }
        }
        if let Some(start) = chunk_start {
            split_chunk(&text[start..], start, &mut ranges);
        }

        ranges
            .into_iter()
            .map(|(start, end)| {
                let piece = &text[start..end];
                let token = Token::new(piece, converter.byte_to_char(start), converter.byte_to_char(end))
                    .with_lemma(piece.to_lowercase());
                let tag = if token.is_number() {
                    "NUM"
                } else if piece.chars().all(is_edge_punctuation) {
                    "PUNCT"
                } else {
                    "X"
                };
                token.with_tag(tag)
            })
            .collect()
    }
}

impl StatisticalEngine for BasicEngine {
    fn analyze(&self, text: &str) -> Result<AnalyzedDoc> {
        Ok(AnalyzedDoc {
            tokens: self.tokens(text),
            entities: DocumentEntitySet::new(),
        })
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

/// Split one whitespace chunk into byte ranges.
fn split_chunk(chunk: &str, base: usize, out: &mut Vec<(usize, usize)>) {
    let lead = chunk.len() - chunk.trim_start_matches(is_edge_punctuation).len();
    if lead == chunk.len() {
        push_punct_runs(chunk, base, out);
        return;
    }
    let core = chunk[lead..].trim_end_matches(is_edge_punctuation);
    let core_start = base + lead;
    let core_end = core_start + core.len();

    push_punct_runs(&chunk[..lead], base, out);
    match contraction_split(core) {
        Some(at) => {
            out.push((core_start, core_start + at));
            out.push((core_start + at, core_end));
        }
        None => out.push((core_start, core_end)),
    }
    push_punct_runs(&chunk[lead + core.len()..], core_end, out);
}

/// Byte index where a contraction suffix starts, if the word has one.
///
/// Curly apostrophes count as apostrophes.
fn contraction_split(word: &str) -> Option<usize> {
    CONTRACTION_SUFFIXES.iter().find_map(|suffix| {
        [suffix.to_string(), suffix.replace('\'', "\u{2019}")]
            .into_iter()
            .find_map(|variant| {
                let at = word.len().checked_sub(variant.len())?;
                (at > 0 && word.is_char_boundary(at) && word[at..].eq_ignore_ascii_case(&variant))
                    .then_some(at)
            })
    })
}

/// Push runs of identical punctuation characters as separate ranges.
fn push_punct_runs(s: &str, base: usize, out: &mut Vec<(usize, usize)>) {
    let mut run: Option<(usize, char)> = None;
    for (idx, ch) in s.char_indices() {
        match run {
            Some((_, prev)) if prev == ch => {}
            Some((start, _)) => {
                out.push((base + start, base + idx));
                run = Some((idx, ch));
            }
            None => run = Some((idx, ch)),
        }
    }
    if let Some((start, _)) = run {
        out.push((base + start, base + s.len()));
    }
}

// =============================================================================
// MockEngine
// =============================================================================

/// Engine with preset entity labels.
///
/// Tokens come from [`BasicEngine`]; every token run whose lower-cased texts
/// equal a registered phrase is reported as an entity with that label, and
/// its tokens get the label as `ent_type`.
///
/// # Example
///
/// ```rust
/// use lexner::{MockEngine, StatisticalEngine};
///
/// let engine = MockEngine::new("mock").with_entity("London", "GPE");
/// let doc = engine.analyze("I live in London").unwrap();
/// assert_eq!(doc.entities.records()[0].label, "GPE");
/// ```
#[derive(Debug, Clone)]
pub struct MockEngine {
    name: &'static str,
    entities: Vec<(Vec<String>, String)>,
}

impl MockEngine {
    /// Create a mock engine with no preset entity.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entities: Vec::new(),
        }
    }

    /// Label every occurrence of `phrase` with `label`.
    #[must_use]
    pub fn with_entity(mut self, phrase: &str, label: &str) -> Self {
        let terms: Vec<String> = BasicEngine
            .tokens(phrase)
            .iter()
            .map(Token::lower)
            .collect();
        if !terms.is_empty() {
            self.entities.push((terms, label.to_string()));
        }
        self
    }
}

impl StatisticalEngine for MockEngine {
    fn analyze(&self, text: &str) -> Result<AnalyzedDoc> {
        let mut tokens = BasicEngine.tokens(text);
        let converter = SpanConverter::new(text);
        let lowered: Vec<String> = tokens.iter().map(Token::lower).collect();
        let mut entities = DocumentEntitySet::new();

        for start in 0..tokens.len() {
            for (terms, label) in &self.entities {
                let end = start + terms.len();
                if end > tokens.len() || lowered[start..end] != terms[..] {
                    continue;
                }
                let surface = &text[converter.char_to_byte(tokens[start].start)
                    ..converter.char_to_byte(tokens[end - 1].end)];
                let record = EntityRecord::new(surface, label.as_str(), Span { start, end });
                // First registered label wins a contested token run.
                if entities.try_insert(record).is_ok() {
                    for token in &mut tokens[start..end] {
                        token.ent_type = Some(label.clone());
                    }
                }
            }
        }
        Ok(AnalyzedDoc { tokens, entities })
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
