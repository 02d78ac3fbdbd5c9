//! # Context Chunker Core
//!
//! Shared, I/O-free logic for Context Chunker: the overlapping chunker,
//! its configuration and error types, and the chunk records handed to
//! embedding pipelines.
//!
//! This crate contains no filesystem access, async runtime, or other
//! native-only dependencies.
//!
//! ```rust
//! use context_chunker_core::chunk::chunk_text;
//!
//! let chunks = chunk_text("Short text.", 50, 5).unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!((chunks[0].start, chunks[0].end), (0, 11));
//! ```

pub mod chunk;
pub mod error;
pub mod models;
pub mod text;

pub use chunk::{chunk_text, Chunker, Chunks, ChunkingConfig};
pub use error::ChunkError;
pub use models::{fingerprint, Chunk, ChunkRecord};
