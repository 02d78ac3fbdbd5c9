//! Data models produced by the chunker.
//!
//! [`Chunk`] is the borrowed view emitted while iterating; [`ChunkRecord`]
//! is the owned, serializable form handed to embedding and vector-store
//! consumers, keyed by a content [`fingerprint`].

use std::ops::Range;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A contiguous span of the input text.
///
/// `start` and `end` are codepoint offsets into the input; `text` is the
/// substring `input[start..end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    /// Byte offset of `text` within the input.
    pub(crate) byte_start: usize,
}

impl<'a> Chunk<'a> {
    /// Length in codepoints.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Byte span of this chunk inside the original input.
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_start + self.text.len()
    }
}

/// Compute the content fingerprint of a chunk.
///
/// Lowercase hex SHA-256 of `"{file}:{start}:{end}:{text}"`. Any change to the
/// file identifier, the span, or the text produces a different id.
pub fn fingerprint(file: &str, start: usize, end: usize, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:{}:", file, start, end).as_bytes());
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// An owned chunk with its source metadata and fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub file: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl ChunkRecord {
    pub fn from_chunk(file: &str, chunk: &Chunk<'_>) -> Self {
        Self {
            id: fingerprint(file, chunk.start, chunk.end, chunk.text),
            file: file.to_string(),
            start: chunk.start,
            end: chunk.end,
            text: chunk.text.to_string(),
        }
    }

    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
