//! Codepoint-indexed view over a `&str`.
//!
//! The chunker reasons in Unicode scalar values (codepoints), not bytes, so
//! that a boundary can never land inside a multi-byte UTF-8 sequence.
//! [`CodepointText`] precomputes the byte offset of every codepoint once and
//! then answers classification and slicing queries in `O(1)`.
//!
//! Whitespace is classified with [`char::is_whitespace`], i.e. the Unicode
//! `White_Space` property. ASCII control separators such as `U+001C..U+001F`
//! are therefore *not* whitespace.

/// A string plus the byte offset of each of its codepoints.
#[derive(Debug, Clone)]
pub struct CodepointText<'a> {
    text: &'a str,
    /// `offsets[i]` is the byte offset of codepoint `i`; the final entry is
    /// `text.len()` so that `offsets[len()]` is valid.
    offsets: Vec<usize>,
    whitespace: Vec<bool>,
}

impl<'a> CodepointText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut offsets = Vec::with_capacity(text.len() + 1);
        let mut whitespace = Vec::with_capacity(text.len());
        for (i, c) in text.char_indices() {
            offsets.push(i);
            whitespace.push(c.is_whitespace());
        }
        offsets.push(text.len());
        Self {
            text,
            offsets,
            whitespace,
        }
    }

    /// Number of codepoints.
    pub fn len(&self) -> usize {
        self.whitespace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.whitespace.is_empty()
    }

    /// Whether the codepoint at `pos` is whitespace. Out-of-range positions
    /// are never whitespace.
    pub fn is_whitespace(&self, pos: usize) -> bool {
        self.whitespace.get(pos).copied().unwrap_or(false)
    }

    /// Whether a word starts at `pos`: the previous codepoint is whitespace
    /// and the one at `pos` is not. Position 0 never qualifies.
    pub fn is_word_start(&self, pos: usize) -> bool {
        pos > 0 && pos < self.len() && self.whitespace[pos - 1] && !self.whitespace[pos]
    }

    /// Byte range covered by codepoints `start..end`.
    ///
    /// Both bounds are clamped to `len()`.
    pub fn byte_range(&self, start: usize, end: usize) -> std::ops::Range<usize> {
        let end = end.min(self.len());
        let start = start.min(end);
        self.offsets[start]..self.offsets[end]
    }

    /// Borrow codepoints `start..end` as a string slice.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let range = self.byte_range(start, end);
        &self.text[range]
    }
}
