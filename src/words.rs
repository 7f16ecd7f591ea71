//! Word splitting and candidate phrases.
//!
//! This is the tokenization contract shared by literal and regex matching:
//!
//! 1. The text is split on whitespace.
//! 2. Leading and trailing punctuation is stripped from every chunk; chunks
//!    that were nothing but punctuation disappear. Inner punctuation stays
//!    (`don't`, `A-213`, `3.5`).
//! 3. A *candidate phrase* is any contiguous run of words. A message of `n`
//!    words has `n * (n + 1) / 2` phrases, so `"This is short"` yields six.
//!
//! Dictionary values go through the same splitter, and phrases are compared by
//! their lower-cased words joined with a single space, so `"Diet   Coke"`,
//! `"diet coke"` and `"Diet Coke!"` share one key.

use lexner_core::Span;

use crate::offset::SpanConverter;

/// A word of the input, with both byte and character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    /// Word text (borrowed from the input)
    pub text: &'a str,
    /// Start byte offset (inclusive)
    pub byte_start: usize,
    /// End byte offset (exclusive)
    pub byte_end: usize,
    /// Character span in the input
    pub span: Span,
}

/// Characters stripped from the edges of a word.
pub fn is_edge_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2026}' | '\u{00AB}' | '\u{00BB}'
                | '\u{00BF}' | '\u{00A1}'
        )
}

/// Split `text` into words (see module docs).
#[must_use]
pub fn split_words(text: &str) -> Vec<Word<'_>> {
    let converter = SpanConverter::new(text);
    let mut words = Vec::new();
    let mut chunk_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), chunk_start) {
            (true, Some(start)) => {
                words.extend(trim_chunk(text, &converter, start, idx));
                chunk_start = None;
            }
            (false, None) => chunk_start = Some(idx),
            _ => {}
        }
    }
    if let Some(start) = chunk_start {
        words.extend(trim_chunk(text, &converter, start, text.len()));
    }

    words
}

fn trim_chunk<'a>(
    text: &'a str,
    converter: &SpanConverter,
    start: usize,
    end: usize,
) -> Option<Word<'a>> {
    let chunk = &text[start..end];
    let trimmed = chunk.trim_matches(is_edge_punctuation);
    if trimmed.is_empty() {
        return None;
    }
    let byte_start = start + (chunk.len() - chunk.trim_start_matches(is_edge_punctuation).len());
    let byte_end = byte_start + trimmed.len();
    Some(Word {
        text: trimmed,
        byte_start,
        byte_end,
        span: Span {
            start: converter.byte_to_char(byte_start),
            end: converter.byte_to_char(byte_end),
        },
    })
}

/// Candidate phrases over `word_count` words, as word-index spans.
///
/// Ordered by length, then by position. `max_words` caps phrase length.
pub fn phrase_spans(word_count: usize, max_words: Option<usize>) -> impl Iterator<Item = Span> {
    let longest = max_words.map_or(word_count, |m| m.min(word_count));
    (1..=longest).flat_map(move |len| {
        (0..=word_count - len).map(move |start| Span {
            start,
            end: start + len,
        })
    })
}

/// Surface text of a phrase, sliced verbatim from the input.
#[must_use]
pub fn phrase_text<'a>(text: &'a str, words: &[Word<'a>], phrase: Span) -> &'a str {
    &text[words[phrase.start].byte_start..words[phrase.end - 1].byte_end]
}

/// Character span of a phrase in the input.
#[must_use]
pub fn phrase_char_span(words: &[Word<'_>], phrase: Span) -> Span {
    Span {
        start: words[phrase.start].span.start,
        end: words[phrase.end - 1].span.end,
    }
}

/// Comparison key of a phrase: lower-cased words joined by one space.
#[must_use]
pub fn phrase_key(words: &[Word<'_>], phrase: Span) -> String {
    join_lower(words[phrase.start..phrase.end].iter().map(|w| w.text))
}

/// Comparison key of a dictionary value, or `None` if it contains no word.
#[must_use]
pub fn value_key(value: &str) -> Option<String> {
    let words = split_words(value);
    if words.is_empty() {
        None
    } else {
        Some(join_lower(words.iter().map(|w| w.text)))
    }
}

/// Every candidate phrase of `text`, as text.
///
/// ```rust
/// use lexner::words::split_message;
///
/// let phrases = split_message("This is short");
/// assert_eq!(phrases.len(), 6);
/// assert!(phrases.contains(&"is short".to_string()));
/// ```
#[must_use]
pub fn split_message(text: &str) -> Vec<String> {
    let words = split_words(text);
    phrase_spans(words.len(), None)
        .map(|p| phrase_text(text, &words, p).to_string())
        .collect()
}

fn join_lower<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut key = String::new();
    for (i, w) in words.enumerate() {
        if i > 0 {
            key.push(' ');
        }
        key.push_str(&w.to_lowercase());
    }
    key
}
