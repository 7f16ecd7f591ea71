//! Byte/character offset handling.
//!
//! Rust string slicing and `regex` work in byte offsets, while every span
//! lexner reports to callers is in characters:
//!
//! ```text
//! Text: "a café, Focus"
//!
//!   byte:  a _ c a f [é] , _ F  o  c  u  s
//!          0 1 2 3 4 5-6 7 8 9 10 11 12 13
//!   char:  a _ c a f  é  , _ F  o  c  u  s
//!          0 1 2 3 4  5  6 7 8  9 10 11 12
//! ```
//!
//! [`SpanConverter`] precomputes both directions once per text so each
//! conversion is O(1).

/// Build a table where `map[byte_idx]` is the character index.
///
/// Bytes inside a multi-byte character map to that character.
#[must_use]
pub fn build_byte_to_char_map(text: &str) -> Vec<usize> {
    let mut map = vec![0usize; text.len() + 1];
    for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
        for slot in map.iter_mut().skip(byte_idx).take(ch.len_utf8()) {
            *slot = char_idx;
        }
    }
    map[text.len()] = text.chars().count();
    map
}

/// Build a table where `map[char_idx]` is the byte index.
#[must_use]
pub fn build_char_to_byte_map(text: &str) -> Vec<usize> {
    let mut map: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    map.push(text.len());
    map
}

/// Converter for efficiently handling many offsets from the same text.
#[derive(Debug, Clone)]
pub struct SpanConverter {
    byte_to_char: Vec<usize>,
    char_to_byte: Vec<usize>,
    is_ascii: bool,
    len: usize,
}

impl SpanConverter {
    /// Create a converter for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            // Identity mapping
            Self {
                byte_to_char: Vec::new(),
                char_to_byte: Vec::new(),
                is_ascii: true,
                len: text.len(),
            }
        } else {
            Self {
                byte_to_char: build_byte_to_char_map(text),
                char_to_byte: build_char_to_byte_map(text),
                is_ascii: false,
                len: text.len(),
            }
        }
    }

    /// Convert byte offset to char offset (clamped to the end of the text).
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        if self.is_ascii {
            byte_idx.min(self.len)
        } else {
            self.byte_to_char
                .get(byte_idx)
                .or_else(|| self.byte_to_char.last())
                .copied()
                .unwrap_or(0)
        }
    }

    /// Convert char offset to byte offset (clamped to the end of the text).
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        if self.is_ascii {
            char_idx.min(self.len)
        } else {
            self.char_to_byte
                .get(char_idx)
                .or_else(|| self.char_to_byte.last())
                .copied()
                .unwrap_or(0)
        }
    }
}
