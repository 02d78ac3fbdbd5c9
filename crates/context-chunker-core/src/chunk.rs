//! Overlapping, whitespace-snapped text chunker.
//!
//! Splits text into [`Chunk`]s of roughly `chunk_size` codepoints where each
//! chunk overlaps its predecessor by roughly `overlap_size` codepoints.
//! Boundaries are nudged onto whitespace so chunks rarely start or end in
//! the middle of a word.
//!
//! # Algorithm
//!
//! For each chunk, starting at `start = 0`:
//!
//! 1. Provisional end is `start + chunk_size`. If that runs past the input,
//!    or leaves a tail of at most `overlap_size`, the chunk takes the rest of
//!    the input and is the last one.
//! 2. Otherwise the end is snapped forward onto the first whitespace found
//!    within the overfill window. No whitespace means a mid-word split.
//! 3. The next start is `end - overlap_size`, snapped forward onto the first
//!    word start (whitespace followed by non-whitespace) before
//!    `end - overfill`. No word start means the unsnapped position is kept.
//!
//! `overfill` is `overlap_size / 2`, or `chunk_size / 2` when there is no
//! overlap. It bounds both scans, so total work stays linear in the input.
//!
//! # Example
//!
//! ```rust
//! use context_chunker_core::chunk::{Chunker, ChunkingConfig};
//!
//! let chunker = Chunker::new(ChunkingConfig::new(10, 5).unwrap());
//! let first = chunker
//!     .chunks("This is a test text for the text_to_chunks method.")
//!     .next()
//!     .unwrap();
//! assert_eq!((first.start, first.end, first.text), (0, 10, "This is a "));
//! ```

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ChunkError;
use crate::models::{Chunk, ChunkRecord};
use crate::text::CodepointText;

/// Smallest accepted `chunk_size`.
pub const MIN_CHUNK_SIZE: usize = 10;
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_OVERLAP_SIZE: usize = 100;

/// Validated chunk and overlap sizes, both in codepoints.
///
/// Construct with [`ChunkingConfig::new`]. Deserialization goes through the
/// same validation, so an invalid `[chunking]` table is rejected at load
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChunkingConfig")]
pub struct ChunkingConfig {
    chunk_size: usize,
    overlap_size: usize,
}

impl ChunkingConfig {
    /// Validate and build a config.
    ///
    /// Fails when `chunk_size < 10` or `chunk_size < overlap_size`.
    pub fn new(chunk_size: usize, overlap_size: usize) -> Result<Self, ChunkError> {
        if chunk_size < MIN_CHUNK_SIZE {
            return Err(ChunkError::InvalidConfig {
                chunk_size,
                overlap_size,
                reason: "chunk_size must be at least 10",
            });
        }
        if chunk_size < overlap_size {
            return Err(ChunkError::InvalidConfig {
                chunk_size,
                overlap_size,
                reason: "chunk_size must not be smaller than overlap_size",
            });
        }
        Ok(Self {
            chunk_size,
            overlap_size,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap_size(&self) -> usize {
        self.overlap_size
    }

    /// Maximum distance a boundary may be shifted while searching for a snap
    /// point.
    pub fn overfill(&self) -> usize {
        if self.overlap_size > 0 {
            self.overlap_size / 2
        } else {
            self.chunk_size / 2
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
        }
    }
}

#[derive(Deserialize)]
struct RawChunkingConfig {
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "default_overlap_size")]
    overlap_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_overlap_size() -> usize {
    DEFAULT_OVERLAP_SIZE
}

impl TryFrom<RawChunkingConfig> for ChunkingConfig {
    type Error = ChunkError;

    fn try_from(raw: RawChunkingConfig) -> Result<Self, Self::Error> {
        ChunkingConfig::new(raw.chunk_size, raw.overlap_size)
    }
}

/// Stateless chunker. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Lazily chunk `text`. An empty input yields nothing.
    pub fn chunks<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks::new(text, self.config)
    }

    /// Chunk `text` into owned records keyed by `file`.
    pub fn records<'a>(
        &self,
        file: &'a str,
        text: &'a str,
    ) -> impl Iterator<Item = ChunkRecord> + 'a {
        self.chunks(text)
            .map(move |chunk| ChunkRecord::from_chunk(file, &chunk))
    }
}

/// Validate the sizes and chunk `text` eagerly.
///
/// Nothing is produced when the config is invalid.
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap_size: usize,
) -> Result<Vec<Chunk<'_>>, ChunkError> {
    let config = ChunkingConfig::new(chunk_size, overlap_size)?;
    Ok(Chunker::new(config).chunks(text).collect())
}

/// Iterator over the chunks of one input.
///
/// Finite and not restartable; call [`Chunker::chunks`] again to start over.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: CodepointText<'a>,
    chunk_size: usize,
    overlap_size: usize,
    overfill: usize,
    /// Start of the next chunk, `None` once the input is covered.
    cursor: Option<usize>,
}

impl<'a> Chunks<'a> {
    fn new(text: &'a str, config: ChunkingConfig) -> Self {
        let text = CodepointText::new(text);
        let cursor = if text.is_empty() { None } else { Some(0) };
        Self {
            text,
            chunk_size: config.chunk_size,
            overlap_size: config.overlap_size,
            overfill: config.overfill(),
            cursor,
        }
    }

    /// Phase 1: provisional end, or `None` when this chunk must absorb the
    /// remainder of the input.
    fn provisional_end(&self, start: usize) -> Option<usize> {
        let len = self.text.len();
        let end = start + self.chunk_size;
        if end > len || len - end <= self.overlap_size {
            None
        } else {
            Some(end)
        }
    }

    /// Phase 2: move `end` forward onto whitespace.
    ///
    /// Steps past non-whitespace while within `overfill` of `end`; the
    /// position reached is at most `overfill + 1` away.
    fn snap_end(&self, end: usize) -> usize {
        let limit = (end + self.overfill + 1).min(self.text.len());
        let mut pos = end;
        while pos < limit && !self.text.is_whitespace(pos) {
            pos += 1;
        }
        if self.text.is_whitespace(pos) {
            pos
        } else {
            end
        }
    }

    /// Phase 3: start of the chunk following one that ended at `end`.
    fn next_start(&self, start: usize, end: usize) -> usize {
        let unsnapped = end - self.overlap_size;
        let limit = end.saturating_sub(self.overfill);
        let mut pos = unsnapped.max(1);
        while pos < limit && !self.text.is_word_start(pos) {
            pos += 1;
        }
        let next = if self.text.is_word_start(pos) {
            pos
        } else {
            unsnapped
        };
        // Only reachable when overlap_size == chunk_size.
        if next <= start {
            start + 1
        } else {
            next
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor?;
        let end = match self.provisional_end(start) {
            Some(end) => self.snap_end(end),
            None => self.text.len(),
        };

        let range = self.text.byte_range(start, end);
        let chunk = Chunk {
            start,
            end,
            text: self.text.slice(start, end),
            byte_start: range.start,
        };
        trace!(start, end, "chunk");

        self.cursor = if end >= self.text.len() {
            debug!(len = self.text.len(), "input covered");
            None
        } else {
            Some(self.next_start(start, end))
        };
        Some(chunk)
    }
}

impl FusedIterator for Chunks<'_> {}
