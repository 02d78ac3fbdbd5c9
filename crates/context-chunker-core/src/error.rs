//! Error types for the chunker.

use thiserror::Error;

/// Errors raised while validating chunking parameters.
///
/// Validation happens up front in [`ChunkingConfig::new`](crate::ChunkingConfig::new);
/// once a config exists, chunking itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("invalid chunking config (chunk_size={chunk_size}, overlap_size={overlap_size}): {reason}")]
    InvalidConfig {
        chunk_size: usize,
        overlap_size: usize,
        reason: &'static str,
    },
}
